//! `storage` wraps `localStorage` reads and writes; `theme` holds the
//! browser-free rules for picking and flipping the light/dark theme.

pub mod storage;
pub mod theme;
