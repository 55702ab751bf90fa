//! Item catalog for the game backend
//!
//! A shared catalog keyed by numeric item code. These routes carry no
//! authentication; the catalog is globally readable and writable.

pub mod api;

pub use api::{ItemApiState, item_api_router};
