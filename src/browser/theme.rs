//! Theme controller wiring: storage, `matchMedia`, root attribute, icon.

use std::rc::Rc;

use crate::config::UiConfig;
use crate::controllers::theme::{ThemeHost, init_theme, on_os_preference_change, toggle_theme};
use crate::util::storage;
use crate::util::theme::{DARK_SCHEME_QUERY, IconClasses, Theme};

/// [`ThemeHost`] over the current window.
pub struct WebThemeHost {
    config: UiConfig,
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebThemeHost {
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

    fn dark_scheme_query(&self) -> Option<web_sys::MediaQueryList> {
        self.window.match_media(DARK_SCHEME_QUERY).ok().flatten()
    }
}

impl ThemeHost for WebThemeHost {
    fn stored_theme(&self) -> Option<String> {
        storage::load(&self.config.theme_storage_key)
    }

    fn store_theme(&self, theme: Theme) {
        if !storage::save(&self.config.theme_storage_key, theme.as_str()) {
            log::debug!("theme choice `{theme}` not persisted");
        }
    }

    fn os_prefers_dark(&self) -> bool {
        self.dark_scheme_query().map_or(false, |mq| mq.matches())
    }

    fn applied_theme(&self) -> Option<String> {
        self.document
            .document_element()?
            .get_attribute(&self.config.theme_attribute)
    }

    fn set_applied_theme(&self, theme: Theme) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        if let Err(e) = root.set_attribute(&self.config.theme_attribute, theme.as_str()) {
            leptos::logging::error!("failed to apply theme `{theme}`: {e:?}");
        }
    }

    fn set_icon(&self, theme: Theme) {
        let Some(icon) = self.document.get_element_by_id(&self.config.theme_icon_id) else {
            return;
        };
        let classes = IconClasses::for_theme(theme, &self.config);
        super::set_class(&icon, classes.remove, false);
        super::set_class(&icon, classes.add, true);
    }
}

/// Set the root attribute before the body renders, so a dark page does not
/// flash light. The icon is handled later by [`bind`].
pub fn apply_early(config: &UiConfig) {
    if let Some(host) = WebThemeHost::new(config.clone()) {
        init_theme(&host);
    }
}

/// Apply the effective theme and register the toggle and OS listeners.
pub fn bind(config: &UiConfig) {
    let Some(host) = WebThemeHost::new(config.clone()) else {
        return;
    };
    let host = Rc::new(host);
    init_theme(host.as_ref());

    match host.document.get_element_by_id(&config.theme_toggle_id) {
        Some(button) => {
            let host = Rc::clone(&host);
            super::listen(&button, "click", move |_| {
                toggle_theme(host.as_ref());
            });
        }
        None => log::debug!("no #{} on this page", config.theme_toggle_id),
    }

    if let Some(query) = host.dark_scheme_query() {
        let host = Rc::clone(&host);
        super::listen(&query, "change", move |_| {
            on_os_preference_change(host.as_ref());
        });
    }
}
