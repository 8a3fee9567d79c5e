//! The storage trait all Shelf backends implement.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use shelf_core::{Fields, Record, Result, Schema};

/// How `update` treats attributes absent from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Full-replace: every schema field is rewritten, taking the payload
    /// value when supplied and falling back to the record's current value
    /// (or the declared default) when absent. The record comes out
    /// normalized to schema field order.
    Replace,
    /// Partial-merge: only the supplied fields change; everything else is
    /// left byte-for-byte untouched.
    Merge,
}

/// The contract every Shelf store backend implements.
///
/// A store owns its record collection outright: callers get clones, never
/// references into live state. Implementations must be thread-safe
/// (`Send + Sync`), and every mutation must be atomic with respect to id
/// assignment — no interleaving may observe `next_id` between its read and
/// increment.
///
/// # Example
///
/// ```ignore
/// use shelf_storage::{DynStore, UpdateMode};
///
/// async fn finish(store: &DynStore, id: u64) -> shelf_core::Result<()> {
///     let mut patch = shelf_core::Fields::new();
///     patch.insert("done".into(), serde_json::json!(true));
///     store.update(id, &patch, UpdateMode::Merge).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// The schema this store validates payloads against.
    fn schema(&self) -> &Schema;

    /// Returns all records in insertion order. Never fails.
    async fn list(&self) -> Vec<Record>;

    /// Looks up a record by exact id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record has the id.
    async fn get(&self, id: u64) -> Result<Record>;

    /// Validates the payload, assigns the next id, and appends the record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the payload fails the schema;
    /// the store is unchanged in that case.
    async fn create(&self, fields: &Fields) -> Result<Record>;

    /// Applies a validated payload to an existing record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record has the id, or
    /// `StoreError::Validation` for an empty or schema-invalid payload.
    /// The existence check runs first, so a missing id reports `NotFound`
    /// even when the payload would not validate. Validation completes
    /// before any field is applied.
    async fn update(&self, id: u64, fields: &Fields, mode: UpdateMode) -> Result<Record>;

    /// Removes the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record has the id — deletion is
    /// never a silent no-op.
    async fn delete(&self, id: u64) -> Result<()>;

    /// Number of records currently held.
    async fn count(&self) -> usize;

    /// Whether a record with the given id exists.
    async fn exists(&self, id: u64) -> bool;
}

/// Type alias for a shareable store instance.
pub type DynStore = Arc<dyn ResourceStore>;
