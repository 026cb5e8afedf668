//! # Domain Module
//!
//! Business rules for the training log, independent of storage and UI.
//!
//! ## Module Organization
//!
//! - **models**: the immutable [`AppState`] snapshot
//! - **validation**: user-facing validation errors
//! - **sanitize**: best-effort repair of stored or imported JSON
//! - **menu_service**: the exercise menu list
//! - **record_service**: logged sets, validation and display ordering
//! - **export_service**: JSON export and import
//!
//! ## Business Rules
//!
//! - The menu list is never empty and never holds duplicates
//! - A record has a non-empty date and menu, weight > 0 and reps > 0
//! - Records reference menus by name only; removing a menu leaves its records alone
//! - Load and import repair data with exactly the same rules
//!
//! Every operation takes a snapshot and returns a new one; nothing here
//! touches storage except the explicit `save` functions.

pub mod export_service;
pub mod menu_service;
pub mod models;
pub mod record_service;
pub mod sanitize;
pub mod validation;

pub use export_service::{ExportService, ImportError, ImportedData};
pub use models::AppState;
pub use sanitize::Sanitized;
pub use validation::{ValidationError, ValidationErrors};
