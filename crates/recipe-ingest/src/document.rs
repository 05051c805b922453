//! Schema-less documents and the collections that hold them.

use std::fmt;

use serde_json::{Map, Value};

/// Named collection in the document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Users,
    Recipes,
    Interactions,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Users,
        Collection::Recipes,
        Collection::Interactions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Recipes => "recipes",
            Collection::Interactions => "interactions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One source document: an arbitrarily keyed mapping of field to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Convert any JSON value into a document. Non-object values have no
    /// addressable fields and become an empty document.
    pub fn from_value(value: Value) -> (Self, bool) {
        match value {
            Value::Object(fields) => (Self { fields }, true),
            _ => (Self::default(), false),
        }
    }

    /// Field value, treating JSON `null` the same as an absent field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
