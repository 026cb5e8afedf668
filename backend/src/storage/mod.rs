//! # Storage Module
//!
//! Key-value persistence for the training log. Values are JSON strings stored
//! under the keys in [`shared::MENUS_STORAGE_KEY`] and
//! [`shared::RECORDS_STORAGE_KEY`].
//!
//! ## Implementations
//!
//! - [`DbConnection`]: SQLite `key_values` table, used by the CLI
//! - [`MemoryStorage`]: process-local map, used by tests

pub mod db;
pub mod memory;
pub mod traits;

pub use db::DbConnection;
pub use memory::MemoryStorage;
pub use traits::KeyValueStorage;
