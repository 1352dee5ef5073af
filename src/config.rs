//! Page contract configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controllers attach to a server-rendered page, so every element id,
//! class name and endpoint they touch is data here rather than a literal in
//! handler code. A page can override any subset by embedding a JSON object in
//! `<script type="application/json" id="dunbud-ui-config">`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

/// Element id of the optional JSON override block.
pub const CONFIG_ELEMENT_ID: &str = "dunbud-ui-config";

/// DOM ids, class names and endpoints the controllers depend on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub add_link_form_id: String,
    pub links_list_id: String,
    pub no_links_message_id: String,
    pub add_link_errors_id: String,
    pub theme_toggle_id: String,
    pub theme_icon_id: String,
    /// Class that hides an element without removing it.
    pub hidden_class: String,
    /// Classes of a rendered list item.
    pub link_item_class: String,
    /// Styling classes of a delete control.
    pub delete_button_style: String,
    /// Class marking a delete control inside the list.
    pub delete_button_class: String,
    pub delete_icon_class: String,
    /// Prefix of a list item's element id; the link id follows it.
    pub link_item_prefix: String,
    /// Attribute on the delete control holding the link id.
    pub link_id_attribute: String,
    /// Attribute on `<html>` carrying the applied theme.
    pub theme_attribute: String,
    pub theme_storage_key: String,
    pub dark_icon_class: String,
    pub light_icon_class: String,
    /// Name of the hidden anti-forgery input.
    pub csrf_field: String,
    pub csrf_header: String,
    /// Delete route with an `{id}` placeholder.
    pub delete_endpoint: String,
    pub confirm_delete_message: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            add_link_form_id: "add-link-form".to_owned(),
            links_list_id: "helpful-links-list".to_owned(),
            no_links_message_id: "no-links-message".to_owned(),
            add_link_errors_id: "add-link-errors".to_owned(),
            theme_toggle_id: "theme-toggle".to_owned(),
            theme_icon_id: "theme-icon-active".to_owned(),
            hidden_class: "hidden".to_owned(),
            link_item_class: "list-group-item d-flex justify-content-between align-items-center".to_owned(),
            delete_button_style: "btn btn-sm btn-outline-danger".to_owned(),
            delete_button_class: "delete-link-btn".to_owned(),
            delete_icon_class: "fas fa-trash".to_owned(),
            link_item_prefix: "link-".to_owned(),
            link_id_attribute: "data-link-pk".to_owned(),
            theme_attribute: "data-bs-theme".to_owned(),
            theme_storage_key: "theme".to_owned(),
            dark_icon_class: "bi-moon-stars-fill".to_owned(),
            light_icon_class: "bi-sun-fill".to_owned(),
            csrf_field: "csrfmiddlewaretoken".to_owned(),
            csrf_header: "X-CSRFToken".to_owned(),
            delete_endpoint: "/links/{id}/delete/".to_owned(),
            confirm_delete_message: "Are you sure you want to delete this link?".to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse an override block. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `raw` is not an object of string fields.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parse an optional override block, logging and falling back to the
    /// defaults when it is unusable.
    #[must_use]
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                leptos::logging::warn!("ignoring invalid #{CONFIG_ELEMENT_ID} block: {e}");
                Self::default()
            }
        }
    }

    /// Element id of the list item for `id`.
    #[must_use]
    pub fn link_item_id(&self, id: &links::LinkId) -> String {
        format!("{}{id}", self.link_item_prefix)
    }

    /// Selector matching any delete control inside the list.
    #[must_use]
    pub fn delete_button_selector(&self) -> String {
        format!(".{}", self.delete_button_class)
    }

    /// Selector for the page's anti-forgery input.
    #[must_use]
    pub fn csrf_selector(&self) -> String {
        format!("[name={}]", self.csrf_field)
    }

    /// Read the override block from the current page.
    #[must_use]
    pub fn load() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let raw = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content());
            Self::from_override(raw.as_deref())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }
}
