//! Department record.

use super::entity::{Entity, EntityId, EntityKind, FieldType, FieldValue};
use serde::{Deserialize, Serialize};

/// A department. Holds no reference to its employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
}

/// Filterable department fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentField {
    Id,
    Name,
}

/// Input for `AddDepartment`; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn into_record(self, id: EntityId) -> Department {
        Department {
            id,
            name: self.name,
        }
    }
}

impl Department {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Department {
    type Field = DepartmentField;

    const KIND: EntityKind = EntityKind::Department;

    fn id(&self) -> EntityId {
        self.id
    }

    fn field_value(&self, field: Self::Field) -> FieldValue {
        match field {
            DepartmentField::Id => FieldValue::Int(self.id),
            DepartmentField::Name => FieldValue::Text(self.name.clone()),
        }
    }

    fn field_type(field: Self::Field) -> FieldType {
        match field {
            DepartmentField::Id => FieldType::Int,
            DepartmentField::Name => FieldType::Text,
        }
    }
}
