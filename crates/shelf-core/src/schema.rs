use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::record::Fields;

/// Scalar value kinds a schema field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A JSON string.
    Text,
    /// A JSON boolean.
    Flag,
    /// A JSON integer.
    Integer,
    /// Any JSON number.
    Number,
}

impl FieldKind {
    /// Checks whether the value is of this kind. `null` never matches.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Flag => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
        }
    }

    /// Human-readable kind name used in validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Flag => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
        }
    }
}

/// Declaration of a single mutable attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in payloads and serialized records.
    pub name: String,
    /// Expected value kind.
    pub kind: FieldKind,
    /// Whether `create` payloads must supply this field.
    #[serde(default)]
    pub required: bool,
    /// Value assigned on create when the payload omits this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSpec {
    /// Declares a required field with no default.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
        }
    }

    /// Declares an optional field with a create-time default.
    pub fn optional(name: impl Into<String>, kind: FieldKind, default: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: Some(default),
        }
    }
}

/// What to do with payload keys the schema does not declare.
///
/// `Reject` is the public contract; `Ignore` drops unknown keys silently but
/// never lets them into a record. There is deliberately no mode that injects
/// undeclared keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    #[default]
    Reject,
    Ignore,
}

/// Declarative description of a store's record shape.
///
/// The schema is the validation gate's source of truth: payloads are checked
/// against it once, before any store mutation, and validation is
/// all-or-nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Resource type name used in messages and error bodies (e.g. "todo").
    pub resource_type: String,
    /// Declared fields, in serialization order.
    pub fields: Vec<FieldSpec>,
    /// Policy for payload keys outside the declared set.
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
}

impl Schema {
    /// Creates an empty schema for the given resource type.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            fields: Vec::new(),
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }

    /// Builder-style field declaration.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Builder-style unknown-field policy override.
    #[must_use]
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn check_unknown(&self, fields: &Fields) -> Result<()> {
        if self.unknown_fields == UnknownFieldPolicy::Ignore {
            return Ok(());
        }
        for name in fields.keys() {
            if self.field(name).is_none() {
                return Err(StoreError::validation(format!("unknown field: {name}")));
            }
        }
        Ok(())
    }

    fn check_kinds(&self, fields: &Fields) -> Result<()> {
        for (name, value) in fields {
            if let Some(spec) = self.field(name)
                && !spec.kind.matches(value)
            {
                return Err(StoreError::validation(format!(
                    "{name} must be a {}",
                    spec.kind.name()
                )));
            }
        }
        Ok(())
    }

    /// Validates a `create` payload and produces the full field set.
    ///
    /// Required fields must be present and type-correct; omitted optional
    /// fields take their declared default. The result lists fields in schema
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a missing required field, a
    /// wrong-kind value, or (under `Reject`) an undeclared key. The input is
    /// never partially applied.
    pub fn validate_create(&self, fields: &Fields) -> Result<Fields> {
        self.check_unknown(fields)?;
        self.check_kinds(fields)?;

        let mut out = Fields::new();
        for spec in &self.fields {
            match fields.get(&spec.name) {
                Some(value) => {
                    out.insert(spec.name.clone(), value.clone());
                }
                None if spec.required => {
                    return Err(StoreError::validation(format!("{} is required", spec.name)));
                }
                None => {
                    if let Some(default) = &spec.default {
                        out.insert(spec.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(out)
    }

    /// Validates an `update` payload and returns the effective patch.
    ///
    /// Under `Ignore`, undeclared keys are dropped from the returned patch;
    /// under `Reject` they fail validation. The empty-body check runs against
    /// the raw input, before filtering.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for an empty payload, a wrong-kind
    /// value, or (under `Reject`) an undeclared key.
    pub fn validate_patch(&self, fields: &Fields) -> Result<Fields> {
        if fields.is_empty() {
            return Err(StoreError::validation("empty body"));
        }
        self.check_unknown(fields)?;
        self.check_kinds(fields)?;

        Ok(fields
            .iter()
            .filter(|(name, _)| self.field(name).is_some())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo_schema() -> Schema {
        Schema::new("todo")
            .with_field(FieldSpec::required("task", FieldKind::Text))
            .with_field(FieldSpec::optional("done", FieldKind::Flag, json!(false)))
    }

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_validate_create_fills_defaults() {
        let schema = todo_schema();
        let out = schema
            .validate_create(&fields(&[("task", json!("Ship Z"))]))
            .unwrap();

        assert_eq!(out.get("task"), Some(&json!("Ship Z")));
        assert_eq!(out.get("done"), Some(&json!(false)));
    }

    #[test]
    fn test_validate_create_missing_required() {
        let schema = todo_schema();
        let err = schema
            .validate_create(&fields(&[("done", json!(true))]))
            .unwrap_err();

        assert_eq!(err.to_string(), "task is required");
    }

    #[test]
    fn test_validate_create_wrong_kind() {
        let schema = todo_schema();
        let err = schema
            .validate_create(&fields(&[("task", json!(42))]))
            .unwrap_err();

        assert_eq!(err.to_string(), "task must be a string");
    }

    #[test]
    fn test_validate_create_rejects_unknown_field() {
        let schema = todo_schema();
        let err = schema
            .validate_create(&fields(&[("task", json!("x")), ("owner", json!("me"))]))
            .unwrap_err();

        assert_eq!(err.to_string(), "unknown field: owner");
    }

    #[test]
    fn test_validate_create_ignore_policy_drops_unknown() {
        let schema = todo_schema().with_unknown_fields(UnknownFieldPolicy::Ignore);
        let out = schema
            .validate_create(&fields(&[("task", json!("x")), ("owner", json!("me"))]))
            .unwrap();

        assert!(out.get("owner").is_none());
        assert_eq!(out.get("task"), Some(&json!("x")));
    }

    #[test]
    fn test_validate_create_output_in_schema_order() {
        let schema = todo_schema();
        let out = schema
            .validate_create(&fields(&[("done", json!(true)), ("task", json!("x"))]))
            .unwrap();

        let names: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["task", "done"]);
    }

    #[test]
    fn test_validate_patch_empty_body() {
        let schema = todo_schema();
        let err = schema.validate_patch(&Fields::new()).unwrap_err();
        assert_eq!(err.to_string(), "empty body");
    }

    #[test]
    fn test_validate_patch_wrong_kind() {
        let schema = todo_schema();
        let err = schema
            .validate_patch(&fields(&[("done", json!("yes"))]))
            .unwrap_err();

        assert_eq!(err.to_string(), "done must be a boolean");
    }

    #[test]
    fn test_validate_patch_null_is_rejected() {
        let schema = todo_schema();
        let err = schema
            .validate_patch(&fields(&[("task", Value::Null)]))
            .unwrap_err();

        assert_eq!(err.to_string(), "task must be a string");
    }

    #[test]
    fn test_validate_patch_ignore_policy_filters() {
        let schema = todo_schema().with_unknown_fields(UnknownFieldPolicy::Ignore);
        let patch = schema
            .validate_patch(&fields(&[("owner", json!("me")), ("done", json!(true))]))
            .unwrap();

        assert!(patch.get("owner").is_none());
        assert_eq!(patch.get("done"), Some(&json!(true)));
    }

    #[test]
    fn test_schema_deserializes_from_toml() {
        let toml = r#"
            resource_type = "todo"
            unknown_fields = "reject"

            [[fields]]
            name = "task"
            kind = "text"
            required = true

            [[fields]]
            name = "done"
            kind = "flag"
            default = false
        "#;

        let schema: Schema = toml::from_str(toml).unwrap();
        assert_eq!(schema, todo_schema());
    }

    #[test]
    fn test_field_kind_matches() {
        assert!(FieldKind::Text.matches(&json!("x")));
        assert!(!FieldKind::Text.matches(&json!(1)));
        assert!(FieldKind::Flag.matches(&json!(true)));
        assert!(!FieldKind::Flag.matches(&json!("true")));
        assert!(FieldKind::Integer.matches(&json!(-3)));
        assert!(!FieldKind::Integer.matches(&json!(1.5)));
        assert!(FieldKind::Number.matches(&json!(1.5)));
        assert!(!FieldKind::Number.matches(&Value::Null));
    }
}
