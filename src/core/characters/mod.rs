//! Character management for the game backend
//!
//! Characters are created, deleted, and inspected by authenticated accounts;
//! every route in this module sits behind the authentication gate.

pub mod api;

pub use api::{CharacterApiState, character_api_router};
