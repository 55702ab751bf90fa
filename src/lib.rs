//! Game backend REST API.
//!
//! Provides account registration and login with bcrypt password hashing and
//! JWT issuance, an authentication middleware for bearer tokens, and CRUD
//! endpoints for in-game characters and the shared item catalog, backed by
//! PostgreSQL via SQLx.

pub mod core;
