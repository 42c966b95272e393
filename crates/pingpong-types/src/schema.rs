//! Input schema declarations and validation.
//!
//! A [`SchemaDescriptor`] lists the named fields an operation accepts.
//! It renders to a JSON Schema `inputSchema` for `tools/list` and
//! checks raw call arguments before an operation runs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Primitive JSON type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    /// Returns the JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Returns true if `value` has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// A single declared input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Expected JSON type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable description.
    pub description: String,
    /// Whether the field must be present.
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    /// Declares a required field.
    pub fn required(
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: description.into(),
            required: true,
        }
    }

    /// Declares an optional field.
    pub fn optional(
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type, description)
        }
    }
}

/// Schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The arguments are not a JSON object.
    #[error("input must be an object")]
    NotAnObject,
    /// A required field is absent.
    #[error("missing required field: {field}")]
    MissingField { field: String },
    /// A field is present with the wrong type.
    #[error("field '{field}' must be of type {expected}")]
    WrongType { field: String, expected: &'static str },
}

impl SchemaError {
    /// Name of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField { field } | Self::WrongType { field, .. } => Some(field),
        }
    }
}

/// Ordered set of fields accepted by an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    fields: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    /// Creates a schema from its field declarations.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Renders the schema as a JSON Schema object for MCP advertisement.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = Map::new();
            prop.insert(
                "type".to_string(),
                Value::String(field.field_type.as_str().to_string()),
            );
            prop.insert(
                "description".to_string(),
                Value::String(field.description.clone()),
            );
            properties.insert(field.name.clone(), Value::Object(prop));
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }

        Value::Object(schema)
    }

    /// Checks `input` against the declared fields.
    ///
    /// Returns the argument map on success. Undeclared fields are ignored.
    pub fn validate<'a>(&self, input: &'a Value) -> Result<&'a Map<String, Value>, SchemaError> {
        let obj = input.as_object().ok_or(SchemaError::NotAnObject)?;

        for field in &self.fields {
            match obj.get(&field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(SchemaError::MissingField {
                        field: field.name.clone(),
                    });
                }
                None | Some(Value::Null) => {}
                Some(value) if !field.field_type.matches(value) => {
                    return Err(SchemaError::WrongType {
                        field: field.name.clone(),
                        expected: field.field_type.as_str(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(obj)
    }
}
