//! The web module for the captive portal and admin pages.
//! This file declares the other files in this directory as sub-modules.

pub mod api;
pub mod models;
pub mod pages;
pub mod sessions;

pub use api::{create_router, AppState, AppStateInner};
