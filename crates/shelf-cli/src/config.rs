use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use shelf_core::{FieldKind, FieldSpec, Schema};
use shelf_storage::StoreConfig;

/// Loads a store config from a TOML file, or the built-in todo config when
/// no path is given.
pub fn load(path: Option<&Path>) -> Result<StoreConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("invalid store config in {}", path.display()))
        }
        None => Ok(default_config()),
    }
}

/// The classic todo shape: a required task plus a completion flag.
fn default_config() -> StoreConfig {
    StoreConfig::new(
        Schema::new("todo")
            .with_field(FieldSpec::required("task", FieldKind::Text))
            .with_field(FieldSpec::optional("done", FieldKind::Flag, json!(false))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = load(None).unwrap();
        assert_eq!(config.schema.resource_type, "todo");
        assert!(config.seed.is_empty());
        assert!(config.schema.field("task").unwrap().required);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
                [schema]
                resource_type = "note"

                [[schema.fields]]
                name = "body"
                kind = "text"
                required = true

                [[seed]]
                id = 1
                body = "hello"
            "#
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.schema.resource_type, "note");
        assert_eq!(config.seed.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Some(Path::new("/nonexistent/store.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
