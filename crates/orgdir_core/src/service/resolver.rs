//! Read-time relationship resolution between employees and departments.
//!
//! # Invariants
//! - Resolution is read-only and never fails for missing data: a dangling
//!   `dept_id` yields `None`, a department without matches yields `[]`.
//! - Duplicate department ids resolve to the first record the collection
//!   returns.
//! - Under `EmployeeJoin::LiteralId` a department's employees are the
//!   employees whose own `id` equals the department `id`; `dept_id` is not
//!   consulted. `EmployeeJoin::DeptId` matches on `dept_id` instead.

use crate::model::department::{Department, DepartmentField};
use crate::model::employee::{Employee, EmployeeField};
use crate::repo::entity_repo::EntityRepository;
use crate::store::StoreResult;
use serde::{Deserialize, Serialize};

/// Key used to find the employees of a department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeJoin {
    /// `employee.id == department.id`. Compatible with existing clients.
    #[default]
    LiteralId,
    /// `employee.dept_id == department.id`.
    DeptId,
}

impl EmployeeJoin {
    fn field(self) -> EmployeeField {
        match self {
            Self::LiteralId => EmployeeField::Id,
            Self::DeptId => EmployeeField::DeptId,
        }
    }
}

/// Resolves related entities through secondary repository lookups.
#[derive(Clone)]
pub struct RelationshipResolver {
    departments: EntityRepository<Department>,
    employees: EntityRepository<Employee>,
    join: EmployeeJoin,
}

impl RelationshipResolver {
    pub fn new(
        departments: EntityRepository<Department>,
        employees: EntityRepository<Employee>,
        join: EmployeeJoin,
    ) -> Self {
        Self {
            departments,
            employees,
            join,
        }
    }

    pub fn join(&self) -> EmployeeJoin {
        self.join
    }

    /// Department referenced by `employee.dept_id`, if any.
    pub async fn department_of(&self, employee: &Employee) -> StoreResult<Option<Department>> {
        let matches = self
            .departments
            .find_by_field(DepartmentField::Id, employee.dept_id)
            .await?;
        Ok(matches.into_iter().next())
    }

    /// Employees of `department` under the configured join key.
    pub async fn employees_of(&self, department: &Department) -> StoreResult<Vec<Employee>> {
        self.employees
            .find_by_field(self.join.field(), department.id)
            .await
    }
}
