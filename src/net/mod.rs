//! Networking for the helpful-links endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the create/delete exchanges; the reply schema itself lives
//! in the `links` crate.

pub mod api;
