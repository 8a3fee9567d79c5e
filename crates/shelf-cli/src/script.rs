use anyhow::{Context, Result};
use serde::Deserialize;

use shelf_api::{ApiResponse, JSON_MEDIA_TYPE, ResourceApi};
use shelf_core::Fields;
use shelf_storage::UpdateMode;

/// One line of a Shelf script.
///
/// Create and update payloads travel through the same validation gate a
/// transport layer would use, so a script exercises the full path:
/// content-type check, payload parse, schema validation, store operation.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    List,
    Get {
        id: u64,
    },
    Create {
        fields: Fields,
    },
    Update {
        id: u64,
        fields: Fields,
        #[serde(default = "default_mode")]
        mode: UpdateMode,
    },
    Delete {
        id: u64,
    },
}

fn default_mode() -> UpdateMode {
    UpdateMode::Merge
}

/// Parses a script: one JSON operation per line, blank lines and `#`
/// comments skipped.
pub fn parse(text: &str) -> Result<Vec<Operation>> {
    let mut operations = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let operation = serde_json::from_str(line)
            .with_context(|| format!("invalid operation on line {}", number + 1))?;
        operations.push(operation);
    }
    Ok(operations)
}

/// Applies one operation through the API surface.
pub async fn apply(api: &ResourceApi, operation: &Operation) -> Result<ApiResponse> {
    let response = match operation {
        Operation::List => api.list().await,
        Operation::Get { id } => api.get(*id).await,
        Operation::Create { fields } => {
            let body = serde_json::to_vec(fields).context("failed to encode create payload")?;
            api.create(Some(JSON_MEDIA_TYPE), &body).await
        }
        Operation::Update { id, fields, mode } => {
            let body = serde_json::to_vec(fields).context("failed to encode update payload")?;
            api.update(*id, Some(JSON_MEDIA_TYPE), &body, *mode).await
        }
        Operation::Delete { id } => api.delete(*id).await,
    };
    Ok(response)
}
