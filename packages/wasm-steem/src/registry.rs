//! Operation schema registry
//!
//! Maps operation names to their field definitions and the authority level
//! they require. The registry is loaded once from JSON and then passed by
//! reference to every call that needs it.

use crate::error::WasmSteemError;
use crate::types::Authority;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BUILTIN_OPERATIONS: &str = include_str!("operations.json");

/// Declared type of an operation field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Amount,
    Int,
    Bool,
    Array,
    Object,
    /// Any other type string; values pass through untouched
    Opaque(String),
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "amount" => FieldType::Amount,
            "int" => FieldType::Int,
            "bool" => FieldType::Bool,
            "array" => FieldType::Array,
            "object" => FieldType::Object,
            _ => FieldType::Opaque(s),
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        match t {
            FieldType::Amount => "amount".to_string(),
            FieldType::Int => "int".to_string(),
            FieldType::Bool => "bool".to_string(),
            FieldType::Array => "array".to_string(),
            FieldType::Object => "object".to_string(),
            FieldType::Opaque(s) => s,
        }
    }
}

/// Definition of a single operation field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl FieldSpec {
    pub fn new(field_type: FieldType) -> Self {
        FieldSpec {
            field_type,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Field definitions, in declaration order
pub type FieldSchema = IndexMap<String, FieldSpec>;

/// Schema for one operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
    #[serde(default)]
    pub schema: FieldSchema,
}

/// Read-only mapping of operation name to schema
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationRegistry {
    operations: IndexMap<String, OperationSchema>,
}

impl OperationRegistry {
    /// Load a registry from its JSON document
    pub fn from_json(json: &str) -> Result<Self, WasmSteemError> {
        serde_json::from_str(json).map_err(|e| WasmSteemError::InvalidRegistry(e.to_string()))
    }

    /// Registry bundled with the crate, covering common Steem operations
    pub fn builtin() -> Result<Self, WasmSteemError> {
        Self::from_json(BUILTIN_OPERATIONS)
    }

    pub fn get(&self, name: &str) -> Option<&OperationSchema> {
        self.operations.get(name)
    }

    /// Lookup that treats a missing operation as an error
    pub fn require(&self, name: &str) -> Result<&OperationSchema, WasmSteemError> {
        self.get(name)
            .ok_or_else(|| WasmSteemError::UnknownOperation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn authority_of(&self, name: &str) -> Option<Authority> {
        self.get(name).and_then(|op| op.authority)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
