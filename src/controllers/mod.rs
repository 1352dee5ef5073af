//! Page controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `links` manages the helpful-links list, `theme` the light/dark toggle. The
//! two never share state; each handler takes its capabilities as arguments.

pub mod links;
pub mod theme;
