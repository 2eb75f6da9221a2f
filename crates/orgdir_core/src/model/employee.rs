//! Employee record.
//!
//! # Invariants
//! - `dept_id` is an application-level reference. It is never validated on
//!   write and may point at no department (dangling).

use super::entity::{Entity, EntityId, EntityKind, FieldType, FieldValue};
use serde::{Deserialize, Serialize};

/// An employee. Serialized with camelCase keys (`deptId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub salary: i64,
    pub dept_id: EntityId,
}

/// Filterable employee fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Id,
    Name,
    Age,
    Gender,
    Salary,
    DeptId,
}

/// Input for `AddEmployee`; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub salary: i64,
    pub dept_id: EntityId,
}

impl NewEmployee {
    pub fn into_record(self, id: EntityId) -> Employee {
        Employee {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            salary: self.salary,
            dept_id: self.dept_id,
        }
    }
}

impl Entity for Employee {
    type Field = EmployeeField;

    const KIND: EntityKind = EntityKind::Employee;

    fn id(&self) -> EntityId {
        self.id
    }

    fn field_value(&self, field: Self::Field) -> FieldValue {
        match field {
            EmployeeField::Id => FieldValue::Int(self.id),
            EmployeeField::Name => FieldValue::Text(self.name.clone()),
            EmployeeField::Age => FieldValue::Int(self.age),
            EmployeeField::Gender => FieldValue::Text(self.gender.clone()),
            EmployeeField::Salary => FieldValue::Int(self.salary),
            EmployeeField::DeptId => FieldValue::Int(self.dept_id),
        }
    }

    fn field_type(field: Self::Field) -> FieldType {
        match field {
            EmployeeField::Name | EmployeeField::Gender => FieldType::Text,
            EmployeeField::Id
            | EmployeeField::Age
            | EmployeeField::Salary
            | EmployeeField::DeptId => FieldType::Int,
        }
    }
}
