//! Inventory admin: keeps a local view of the category catalogue in sync
//! with the inventory API.
//!
//! The API is the source of truth. Every mutation goes to it first and the
//! local snapshot is refreshed afterwards.

pub mod auth;
pub mod config;
pub mod confirm;
pub mod console;
pub mod draft;
pub mod error;
pub mod import;
pub mod models;
pub mod notify;
pub mod remote;
pub mod selection;
pub mod store;

pub use console::AdminConsole;
pub use error::{CatalogueError, Operation, ValidationError};
pub use remote::{CatalogueRemote, HttpCatalogueRemote};
pub use store::CatalogueStore;
