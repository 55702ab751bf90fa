//! Database repositories for the game backend
//!
//! Repositories encapsulate data access logic and provide a clean API for
//! business logic to interact with the database. Uniqueness of account
//! identifiers, character names, and item codes is ultimately enforced by
//! the storage-layer unique constraints.

pub mod account;
pub mod character;
pub mod item;

pub use account::{AccountRepository, AccountRepositoryError};
pub use character::{CharacterRepository, CharacterRepositoryError};
pub use item::{ItemRepository, ItemRepositoryError};
