//! Light/dark theme values and the pure rules for choosing between them.
//!
//! The page stores an explicit choice under a single `localStorage` key and
//! mirrors the applied theme into a `data-bs-theme` attribute on `<html>`.
//! Everything here is browser-free; `controllers::theme` drives the DOM.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;

use crate::config::UiConfig;

/// Media query reporting an OS-level dark preference.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Applied color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored or applied value. Only the exact literals are valid.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn from_os(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective theme: a valid stored choice, otherwise the OS preference.
#[must_use]
pub fn preferred_theme(stored: Option<&str>, os_prefers_dark: bool) -> Theme {
    stored
        .and_then(Theme::parse)
        .unwrap_or_else(|| Theme::from_os(os_prefers_dark))
}

/// Theme to switch to from the currently applied attribute value.
///
/// Anything other than `dark` (including a missing attribute) toggles to dark.
#[must_use]
pub fn toggled_theme(applied: Option<&str>) -> Theme {
    applied
        .and_then(Theme::parse)
        .map_or(Theme::Dark, Theme::opposite)
}

/// Whether an OS color-scheme change should be followed.
#[must_use]
pub fn follows_os(stored: Option<&str>) -> bool {
    stored.and_then(Theme::parse).is_none()
}

/// Status icon class update for a theme: add one class, drop the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconClasses<'a> {
    pub add: &'a str,
    pub remove: &'a str,
}

impl<'a> IconClasses<'a> {
    #[must_use]
    pub fn for_theme(theme: Theme, config: &'a UiConfig) -> Self {
        match theme {
            Theme::Dark => Self {
                add: &config.dark_icon_class,
                remove: &config.light_icon_class,
            },
            Theme::Light => Self {
                add: &config.light_icon_class,
                remove: &config.dark_icon_class,
            },
        }
    }
}
