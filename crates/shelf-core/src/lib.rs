//! Core types for the Shelf in-memory resource store.
//!
//! This crate defines the record model, the field schema used by the
//! validation gate, and the error taxonomy shared by every store backend.
//! It contains no storage logic and performs no I/O.

pub mod error;
pub mod record;
pub mod schema;

pub use error::{ErrorCategory, Result, StoreError};
pub use record::{Fields, Record};
pub use schema::{FieldKind, FieldSpec, Schema, UnknownFieldPolicy};
