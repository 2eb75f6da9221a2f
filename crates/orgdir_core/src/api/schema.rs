//! Executable schema built once at startup.
//!
//! # Responsibility
//! - Own the directory service and dispatch parsed operations to it.
//! - Expand relationship fields lazily, per selection.
//!
//! # Invariants
//! - The resolver is invoked only for selected relationship fields.
//! - Nested resolutions of one result list run concurrently.

use super::operation::Operation;
use super::view::{DepartmentView, EmployeeView, Response, Selection};
use super::ApiResult;
use crate::config::DirectoryConfig;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::repo::entity_repo::EntityRepository;
use crate::service::directory_service::DirectoryService;
use crate::store::{open_shared_async, SqliteCollection, StoreResult};
use futures::future::try_join_all;
use log::{error, info};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Entry point for executing directory operations.
///
/// Cheap to clone; clones share storage and may run on separate tasks.
#[derive(Clone)]
pub struct Schema {
    service: DirectoryService,
}

impl Schema {
    pub fn new(service: DirectoryService) -> Self {
        Self { service }
    }

    /// Builds the schema and its storage from configuration.
    ///
    /// Uses SQLite when `database.path` is set, in-process collections
    /// otherwise. The database is opened and migrated on the blocking pool.
    pub async fn open(config: &DirectoryConfig) -> StoreResult<Self> {
        let (departments, employees) = match &config.database.path {
            Some(path) => {
                let conn = open_shared_async(path.clone()).await?;
                let departments: EntityRepository<Department> = EntityRepository::new(
                    Arc::new(SqliteCollection::<Department>::new(Arc::clone(&conn))),
                );
                let employees: EntityRepository<Employee> =
                    EntityRepository::new(Arc::new(SqliteCollection::<Employee>::new(conn)));
                (departments, employees)
            }
            None => (EntityRepository::in_memory(), EntityRepository::in_memory()),
        };
        info!(
            "event=schema_build module=api status=ok storage={} id_strategy={:?} employee_join={:?}",
            if config.database.path.is_some() { "sqlite" } else { "memory" },
            config.id_strategy,
            config.employee_join
        );
        Ok(Self::new(DirectoryService::new(
            departments,
            employees,
            config.id_strategy,
            config.employee_join,
        )))
    }

    pub fn service(&self) -> &DirectoryService {
        &self.service
    }

    pub async fn execute(&self, operation: Operation, selection: Selection) -> ApiResult<Response> {
        let started_at = Instant::now();
        let name = operation.name();
        let result = self.dispatch(operation, selection).await;
        match &result {
            Ok(_) => info!(
                "event=operation_execute module=api status=ok operation={name} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=operation_execute module=api status=error operation={name} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Parses `name`/`args`, executes, and serializes the result to JSON.
    pub async fn execute_json(
        &self,
        name: &str,
        args: Option<&Value>,
        selection: Selection,
    ) -> ApiResult<Value> {
        let operation = Operation::parse(name, args)?;
        let response = self.execute(operation, selection).await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn dispatch(&self, operation: Operation, selection: Selection) -> ApiResult<Response> {
        let response = match operation {
            Operation::ListDepartments => {
                let departments = self.service.list_departments().await?;
                Response::Departments(
                    try_join_all(
                        departments
                            .into_iter()
                            .map(|dept| self.department_view(dept, selection)),
                    )
                    .await?,
                )
            }
            Operation::ListEmployees => {
                let employees = self.service.list_employees().await?;
                Response::Employees(
                    try_join_all(
                        employees
                            .into_iter()
                            .map(|emp| self.employee_view(emp, selection)),
                    )
                    .await?,
                )
            }
            Operation::AddDepartment(input) => {
                let created = self.service.add_department(input).await?;
                Response::Department(self.department_view(created, selection).await?)
            }
            Operation::AddEmployee(input) => {
                let created = self.service.add_employee(input).await?;
                Response::Employee(self.employee_view(created, selection).await?)
            }
        };
        Ok(response)
    }

    async fn department_view(
        &self,
        department: Department,
        selection: Selection,
    ) -> StoreResult<DepartmentView> {
        let employees = if selection.employees {
            Some(self.service.employees_of(&department).await?)
        } else {
            None
        };
        Ok(DepartmentView {
            department,
            employees,
        })
    }

    async fn employee_view(
        &self,
        employee: Employee,
        selection: Selection,
    ) -> StoreResult<EmployeeView> {
        let department = if selection.department {
            Some(self.service.department_of(&employee).await?)
        } else {
            None
        };
        Ok(EmployeeView {
            employee,
            department,
        })
    }
}
