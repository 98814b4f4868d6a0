//! `Database` trait — async interface the app-state store persists through.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic settings storage. One JSON value per `(user_id, key)`.
#[async_trait]
pub trait Database: Send + Sync {
    /// Read a setting. `Ok(None)` when the key has never been written.
    async fn get_setting(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StorageError>;

    /// Write (or overwrite) a setting.
    async fn set_setting(
        &self,
        user_id: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), StorageError>;

    /// Remove a setting. Returns whether a stored value existed.
    async fn delete_setting(&self, user_id: &str, key: &str) -> Result<bool, StorageError>;
}
