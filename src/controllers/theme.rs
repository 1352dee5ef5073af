//! Light/dark theme controller.
//!
//! Reads the stored preference (falling back to the OS color scheme), mirrors
//! the effective theme into the root `data-bs-theme` attribute and the status
//! icon, and writes back only on an explicit toggle.
//!
//! TRADE-OFFS
//! ==========
//! An explicit choice pins the theme for good: OS scheme changes are followed
//! only while no valid choice is stored, and nothing here clears the choice.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::util::theme::{Theme, follows_os, preferred_theme, toggled_theme};

/// Storage, media-query and DOM capability used by the theme controller.
pub trait ThemeHost {
    /// Raw stored preference, if any.
    fn stored_theme(&self) -> Option<String>;
    /// Persist an explicit choice.
    fn store_theme(&self, theme: Theme);
    /// Whether the OS currently reports a dark color scheme.
    fn os_prefers_dark(&self) -> bool;
    /// Raw value of the theme attribute on the root element.
    fn applied_theme(&self) -> Option<String>;
    /// Set the theme attribute on the root element.
    fn set_applied_theme(&self, theme: Theme);
    /// Swap the status icon's classes for `theme`; no-op without an icon.
    fn set_icon(&self, theme: Theme);
}

/// Theme the page should show right now.
pub fn effective_theme<H: ThemeHost>(host: &H) -> Theme {
    preferred_theme(host.stored_theme().as_deref(), host.os_prefers_dark())
}

/// Reflect `theme` onto the attribute and the icon.
pub fn apply_theme<H: ThemeHost>(host: &H, theme: Theme) {
    host.set_applied_theme(theme);
    host.set_icon(theme);
}

/// Apply the effective theme on page load.
pub fn init_theme<H: ThemeHost>(host: &H) -> Theme {
    let theme = effective_theme(host);
    apply_theme(host, theme);
    theme
}

/// Flip the applied theme and remember the choice.
pub fn toggle_theme<H: ThemeHost>(host: &H) -> Theme {
    let next = toggled_theme(host.applied_theme().as_deref());
    host.store_theme(next);
    apply_theme(host, next);
    next
}

/// Follow an OS color-scheme change unless the user has chosen a theme.
///
/// Returns the newly applied theme, or `None` when the change was ignored.
pub fn on_os_preference_change<H: ThemeHost>(host: &H) -> Option<Theme> {
    if !follows_os(host.stored_theme().as_deref()) {
        return None;
    }
    Some(init_theme(host))
}
