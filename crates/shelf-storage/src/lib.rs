//! # shelf-storage
//!
//! Storage layer for the Shelf resource store: the [`ResourceStore`] trait,
//! the in-memory [`MemoryStore`] backend, and a config-driven factory.
//!
//! ## Overview
//!
//! A store owns an ordered collection of records and all CRUD logic:
//! - `list` / `get` — reads, insertion order preserved
//! - `create` — schema validation, atomic id assignment, append
//! - `update` — full-replace or partial-merge, validated before mutation
//! - `delete` — existence-checked removal, never a silent no-op
//!
//! Ids are monotonically increasing for the store's lifetime and are never
//! reused, even across deletions.
//!
//! ## Example
//!
//! ```
//! use shelf_core::{FieldKind, FieldSpec, Schema};
//! use shelf_storage::MemoryStore;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let schema = Schema::new("todo")
//!     .with_field(FieldSpec::required("task", FieldKind::Text))
//!     .with_field(FieldSpec::optional("done", FieldKind::Flag, json!(false)));
//! let store = MemoryStore::new(schema);
//!
//! let mut fields = shelf_core::Fields::new();
//! fields.insert("task".into(), json!("Ship Z"));
//! let record = store.create(&fields).await.unwrap();
//! assert_eq!(record.id, 1);
//! assert_eq!(record.get_field("done"), Some(&json!(false)));
//! # });
//! ```

mod factory;
mod memory;
mod store;

pub use factory::{StoreBackend, StoreConfig, create_store};
pub use memory::MemoryStore;
pub use store::{DynStore, ResourceStore, UpdateMode};

// Re-export the core types most callers need alongside the trait.
pub use shelf_core::{Fields, Record, Result, Schema, StoreError};
