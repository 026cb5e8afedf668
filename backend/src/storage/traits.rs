//! # Storage Traits
//!
//! The abstraction the controller persists through, so the domain never
//! knows whether it is talking to SQLite or a test double.

use anyhow::Result;
use async_trait::async_trait;

/// String-to-string store with overwrite semantics
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Retrieve the value stored under `key`, if any
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;
}
