use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shelf_core::{Record, Result, Schema};

use crate::memory::MemoryStore;
use crate::store::DynStore;

/// Supported store backend types.
///
/// Only the in-memory backend exists today; the enum keeps the config format
/// stable if a persistent backend is ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
}

/// Factory configuration to construct a store instance.
///
/// Deserializable from TOML, e.g.:
///
/// ```toml
/// backend = "memory"
///
/// [schema]
/// resource_type = "todo"
///
/// [[schema.fields]]
/// name = "task"
/// kind = "text"
/// required = true
///
/// [[seed]]
/// id = 1
/// task = "Learn X"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub schema: Schema,
    #[serde(default)]
    pub seed: Vec<Record>,
}

impl StoreConfig {
    /// Creates a config for an unseeded in-memory store.
    pub fn new(schema: Schema) -> Self {
        Self {
            backend: StoreBackend::default(),
            schema,
            seed: Vec::new(),
        }
    }

    /// Builder-style seed records.
    #[must_use]
    pub fn with_seed(mut self, seed: Vec<Record>) -> Self {
        self.seed = seed;
        self
    }
}

/// Create a store instance based on the provided configuration.
///
/// # Errors
///
/// Returns `StoreError::Validation` or `StoreError::Conflict` when the seed
/// records fail the schema or carry duplicate ids.
pub fn create_store(config: &StoreConfig) -> Result<DynStore> {
    match config.backend {
        StoreBackend::Memory => {
            let store = if config.seed.is_empty() {
                MemoryStore::new(config.schema.clone())
            } else {
                MemoryStore::with_seed(config.schema.clone(), config.seed.clone())?
            };
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelf_core::{FieldKind, FieldSpec};

    fn todo_schema() -> Schema {
        Schema::new("todo")
            .with_field(FieldSpec::required("task", FieldKind::Text))
            .with_field(FieldSpec::optional("done", FieldKind::Flag, json!(false)))
    }

    #[tokio::test]
    async fn test_create_store_empty() {
        let store = create_store(&StoreConfig::new(todo_schema())).unwrap();
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_create_store_with_seed() {
        let config = StoreConfig::new(todo_schema())
            .with_seed(vec![Record::new(4).with_field("task", json!("A"))]);

        let store = create_store(&config).unwrap();
        assert_eq!(store.count().await, 1);
        assert!(store.exists(4).await);
    }

    #[tokio::test]
    async fn test_create_store_rejects_bad_seed() {
        let config = StoreConfig::new(todo_schema()).with_seed(vec![Record::new(1)]);
        assert!(create_store(&config).is_err());
    }

    #[tokio::test]
    async fn test_config_from_toml() {
        let toml = r#"
            backend = "memory"

            [schema]
            resource_type = "todo"

            [[schema.fields]]
            name = "task"
            kind = "text"
            required = true

            [[schema.fields]]
            name = "done"
            kind = "flag"
            default = false

            [[seed]]
            id = 1
            task = "Learn X"

            [[seed]]
            id = 2
            task = "Build Y"
        "#;

        let config: StoreConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.schema, todo_schema());

        let store = create_store(&config).unwrap();
        assert_eq!(store.count().await, 2);
        let record = store.get(2).await.unwrap();
        assert_eq!(record.get_field("task"), Some(&json!("Build Y")));
        assert_eq!(record.get_field("done"), Some(&json!(false)));
    }
}
