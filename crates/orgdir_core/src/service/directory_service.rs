//! Directory use-case service.
//!
//! # Responsibility
//! - Provide the four directory operations over department and employee
//!   repositories.
//! - Expose relationship resolution for callers that select related fields.
//!
//! # Invariants
//! - Write paths perform exactly one insert and never check that `dept_id`
//!   refers to an existing department.
//! - No locking spans allocation and insert; atomicity of ids is entirely the
//!   allocator strategy's concern.

use crate::model::department::{Department, NewDepartment};
use crate::model::employee::{Employee, NewEmployee};
use crate::repo::entity_repo::EntityRepository;
use crate::service::id_allocator::{IdAllocator, IdStrategy};
use crate::service::resolver::{EmployeeJoin, RelationshipResolver};
use crate::store::StoreResult;

/// Use-case service for departments and employees.
///
/// Cloning shares the underlying repositories, so one instance can serve many
/// concurrent tasks.
#[derive(Clone)]
pub struct DirectoryService {
    departments: EntityRepository<Department>,
    employees: EntityRepository<Employee>,
    allocator: IdAllocator,
    resolver: RelationshipResolver,
}

impl DirectoryService {
    pub fn new(
        departments: EntityRepository<Department>,
        employees: EntityRepository<Employee>,
        id_strategy: IdStrategy,
        join: EmployeeJoin,
    ) -> Self {
        let resolver = RelationshipResolver::new(departments.clone(), employees.clone(), join);
        Self {
            departments,
            employees,
            allocator: IdAllocator::new(id_strategy),
            resolver,
        }
    }

    /// Service over empty in-process collections.
    pub fn in_memory(id_strategy: IdStrategy, join: EmployeeJoin) -> Self {
        Self::new(
            EntityRepository::in_memory(),
            EntityRepository::in_memory(),
            id_strategy,
            join,
        )
    }

    pub fn resolver(&self) -> &RelationshipResolver {
        &self.resolver
    }

    pub async fn list_departments(&self) -> StoreResult<Vec<Department>> {
        self.departments.list_all().await
    }

    pub async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        self.employees.list_all().await
    }

    /// Allocates an id and inserts the department.
    pub async fn add_department(&self, input: NewDepartment) -> StoreResult<Department> {
        let id = self.allocator.allocate(&self.departments).await?;
        self.departments.insert(input.into_record(id)).await
    }

    /// Allocates an id and inserts the employee.
    pub async fn add_employee(&self, input: NewEmployee) -> StoreResult<Employee> {
        let id = self.allocator.allocate(&self.employees).await?;
        self.employees.insert(input.into_record(id)).await
    }

    pub async fn department_of(&self, employee: &Employee) -> StoreResult<Option<Department>> {
        self.resolver.department_of(employee).await
    }

    pub async fn employees_of(&self, department: &Department) -> StoreResult<Vec<Employee>> {
        self.resolver.employees_of(department).await
    }
}
