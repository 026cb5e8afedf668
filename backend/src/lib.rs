//! # Training Log Backend
//!
//! Contains all non-UI logic for the training log.
//!
//! - **Domain**: menu and record rules, the shared repair pass, export/import
//! - **Storage**: key-value persistence (SQLite on disk, in-memory for tests)
//! - **App**: the controller that owns the current state and mirrors it to storage
//!
//! ## Architecture
//!
//! ```text
//! CLI
//!     ↓
//! App (TrainingLog controller, persist-on-change)
//!     ↓
//! Domain (pure functions over AppState snapshots)
//!     ↓
//! Storage (KeyValueStorage)
//! ```

pub mod app;
pub mod domain;
pub mod storage;

pub use app::{AppError, TrainingLog};
pub use domain::*;
pub use storage::{DbConnection, KeyValueStorage, MemoryStorage};
