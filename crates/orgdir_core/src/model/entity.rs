//! Entity abstraction shared by storage collections and repositories.

use std::fmt::{Debug, Display, Formatter};

/// Entity identifier. Unique per kind only when allocated by a sequence.
pub type EntityId = i64;

/// The two entity kinds held by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Employee,
}

impl EntityKind {
    /// Stable lowercase name used for logs and sequence keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Employee => "employee",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared scalar type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Text,
}

/// Scalar value a record field can be compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Int(_) => FieldType::Int,
            Self::Text(_) => FieldType::Text,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A persisted record kind.
///
/// `Field` enumerates the filterable fields so that lookups by an unknown
/// field name cannot be expressed.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Field: Copy + Debug + Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn field_value(&self, field: Self::Field) -> FieldValue;

    fn field_type(field: Self::Field) -> FieldType;

    /// Returns whether `field == value` holds for this record.
    fn matches(&self, field: Self::Field, value: &FieldValue) -> bool {
        self.field_value(field) == *value
    }
}
