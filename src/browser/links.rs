//! Link list wiring: form submit and delete clicks on the live page.

use std::rc::Rc;

use links::{LinkId, LinkRecord};
use wasm_bindgen::{JsCast, JsValue};

use crate::config::UiConfig;
use crate::controllers::links::{LinkItemView, LinkPage, delete_link, submit_new_link};
use crate::net::api::{HttpLinkApi, LinkFormSubmission};

/// [`LinkPage`] over the current document.
pub struct WebLinkPage {
    config: UiConfig,
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebLinkPage {
    #[must_use]
    pub fn new(config: UiConfig) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            config,
            window,
            document,
        })
    }

    fn element(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    fn render_item(&self, view: &LinkItemView) -> Result<web_sys::Element, JsValue> {
        let item = self.document.create_element("li")?;
        item.set_id(&view.element_id);
        item.set_class_name(&view.item_class);

        let anchor = self.document.create_element("a")?;
        anchor.set_attribute("href", &view.href)?;
        anchor.set_attribute("target", "_blank")?;
        anchor.set_attribute("rel", "noopener noreferrer")?;
        anchor.set_text_content(Some(&view.text));
        item.append_child(&anchor)?;

        let button = self.document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_class_name(&view.button_class);
        button.set_attribute(&view.id_attribute.0, &view.id_attribute.1)?;
        button.set_attribute("aria-label", &view.button_label)?;
        let icon = self.document.create_element("i")?;
        icon.set_class_name(&view.icon_class);
        button.append_child(&icon)?;
        item.append_child(&button)?;

        Ok(item)
    }

    fn write_errors(&self, region: &web_sys::Element, lines: &[String]) -> Result<(), JsValue> {
        region.set_inner_html("");
        for line in lines {
            let paragraph = self.document.create_element("p")?;
            paragraph.set_text_content(Some(line));
            region.append_child(&paragraph)?;
        }
        Ok(())
    }
}

impl LinkPage for WebLinkPage {
    fn append_link(&self, record: &LinkRecord) {
        let Some(list) = self.element(&self.config.links_list_id) else {
            leptos::logging::warn!("no #{} to add link {} to", self.config.links_list_id, record.pk);
            return;
        };
        let view = LinkItemView::new(record, &self.config);
        let appended = self
            .render_item(&view)
            .and_then(|item| list.append_child(&item));
        if let Err(e) = appended {
            leptos::logging::error!("failed to render link {}: {e:?}", record.pk);
        }
    }

    fn remove_link(&self, id: &LinkId) -> bool {
        match self.element(&self.config.link_item_id(id)) {
            Some(item) => {
                item.remove();
                true
            }
            None => false,
        }
    }

    fn link_count(&self) -> usize {
        self.element(&self.config.links_list_id)
            .map_or(0, |list| list.child_element_count() as usize)
    }

    fn reset_form(&self) {
        if let Some(form) = self
            .element(&self.config.add_link_form_id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn set_placeholder_visible(&self, visible: bool) {
        if let Some(placeholder) = self.element(&self.config.no_links_message_id) {
            super::set_class(&placeholder, &self.config.hidden_class, !visible);
        }
    }

    fn show_errors(&self, lines: &[String]) {
        let Some(region) = self.element(&self.config.add_link_errors_id) else {
            if !lines.is_empty() {
                leptos::logging::warn!("add link rejected: {}", lines.join("; "));
            }
            return;
        };
        if let Err(e) = self.write_errors(&region, lines) {
            leptos::logging::error!("failed to render link errors: {e:?}");
        }
        super::set_class(&region, &self.config.hidden_class, lines.is_empty());
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn csrf_token(&self) -> Option<String> {
        self.document
            .query_selector(&self.config.csrf_selector())
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }
}

/// Snapshot the form's action and string fields in document order.
fn read_submission(form: &web_sys::HtmlFormElement) -> Result<LinkFormSubmission, JsValue> {
    let data = web_sys::FormData::new_with_form(form)?;
    let mut fields = Vec::new();
    if let Some(entries) = js_sys::try_iter(&data)? {
        for entry in entries {
            let pair: js_sys::Array = entry?.dyn_into()?;
            // File inputs yield non-string values; the link form has none.
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.push((key, value));
            }
        }
    }
    Ok(LinkFormSubmission {
        action: form.action(),
        fields,
    })
}

/// Id carried by the delete control at or above the click target.
fn clicked_link_id(event: &web_sys::Event, config: &UiConfig) -> Option<LinkId> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = target.closest(&config.delete_button_selector()).ok().flatten()?;
    let raw = button.get_attribute(&config.link_id_attribute);
    let id = raw.as_deref().and_then(LinkId::parse);
    if id.is_none() {
        leptos::logging::warn!("delete control without `{}`", config.link_id_attribute);
    }
    id
}

/// Register the add-link submit handler and the delegated delete handler.
pub fn bind(config: &UiConfig) {
    let Some(page) = WebLinkPage::new(config.clone()) else {
        return;
    };
    let page = Rc::new(page);
    let api = Rc::new(HttpLinkApi::new(config));
    let config = Rc::new(config.clone());

    match page
        .element(&config.add_link_form_id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
    {
        Some(form) => {
            let (page, api, config) = (Rc::clone(&page), Rc::clone(&api), Rc::clone(&config));
            let target = form.clone();
            super::listen(&target, "submit", move |event| {
                event.prevent_default();
                let submission = match read_submission(&form) {
                    Ok(submission) => submission,
                    Err(e) => {
                        leptos::logging::error!("Error adding link: unreadable form: {e:?}");
                        return;
                    }
                };
                let (page, api, config) = (Rc::clone(&page), Rc::clone(&api), Rc::clone(&config));
                wasm_bindgen_futures::spawn_local(async move {
                    submit_new_link(page.as_ref(), api.as_ref(), &config, submission).await;
                });
            });
        }
        None => log::debug!("no #{} on this page", config.add_link_form_id),
    }

    match page.element(&config.links_list_id) {
        Some(list) => {
            let (page, api, config) = (Rc::clone(&page), Rc::clone(&api), Rc::clone(&config));
            super::listen(&list, "click", move |event| {
                let Some(id) = clicked_link_id(&event, &config) else {
                    return;
                };
                let (page, api, config) = (Rc::clone(&page), Rc::clone(&api), Rc::clone(&config));
                wasm_bindgen_futures::spawn_local(async move {
                    delete_link(page.as_ref(), api.as_ref(), &config, id).await;
                });
            });
        }
        None => log::debug!("no #{} on this page", config.links_list_id),
    }
}
