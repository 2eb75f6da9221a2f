//! Core of the department/employee directory.
//!
//! Repositories over per-kind storage collections, read-time relationship
//! resolution, identifier allocation, and the four-operation query/mutation
//! surface that composes them.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use api::operation::Operation;
pub use api::schema::Schema;
pub use api::view::{DepartmentView, EmployeeView, Response, Selection};
pub use api::{ApiError, ApiResult};
pub use config::{ConfigError, DirectoryConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentField, NewDepartment};
pub use model::employee::{Employee, EmployeeField, NewEmployee};
pub use model::entity::{Entity, EntityId, EntityKind, FieldType, FieldValue};
pub use repo::entity_repo::EntityRepository;
pub use service::directory_service::DirectoryService;
pub use service::id_allocator::{IdAllocator, IdStrategy};
pub use service::resolver::{EmployeeJoin, RelationshipResolver};
pub use store::{Collection, MemoryCollection, SqliteCollection, StoreError, StoreResult};
