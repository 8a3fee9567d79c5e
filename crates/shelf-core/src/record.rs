use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered field map of a record, field name to scalar value.
///
/// Insertion order is preserved so a record lists its fields the way the
/// schema declared them.
pub type Fields = IndexMap<String, Value>;

/// A single addressable resource instance held by a store.
///
/// The `id` is assigned by the store at creation and is immutable from then
/// on. All mutable attributes live in `fields`, which serializes flat next
/// to the id:
///
/// ```
/// use shelf_core::Record;
/// use serde_json::json;
///
/// let record = Record::new(3).with_field("task", json!("Ship Z"));
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json, json!({"id": 3, "task": "Ship Z"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Creates an empty record with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Fields::new(),
        }
    }

    /// Creates a record from an already-validated field map.
    pub fn with_fields(id: u64, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a field, preserving its position when it already exists.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }
}
