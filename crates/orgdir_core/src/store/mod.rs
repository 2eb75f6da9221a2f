//! Storage collaborator contract and its implementations.
//!
//! # Responsibility
//! - Define the per-kind collection capability the core consumes.
//! - Provide an in-process collection and a SQLite-backed collection.
//!
//! # Invariants
//! - Retrieval is unordered from the caller's point of view; both
//!   implementations happen to return insertion order.
//! - An empty match set is `Ok(vec![])`, never an error.
//! - `next_sequence` is atomic per kind: two calls never return the same
//!   value, and the value is always above every stored id.

use crate::db::DbError;
use crate::model::entity::{Entity, EntityId, FieldValue};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCollection;
pub use sqlite::{
    open_shared, open_shared_async, open_shared_in_memory, SharedConnection, SqlEntity,
    SqliteCollection,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure failure of a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Next sequence value: one past both the last issued value and the largest
/// stored id.
pub(crate) fn next_sequence_after(
    last_issued: EntityId,
    max_id: EntityId,
) -> StoreResult<EntityId> {
    last_issued.max(max_id).checked_add(1).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "id sequence exhausted: largest id {} is EntityId::MAX",
            last_issued.max(max_id)
        ))
    })
}

/// Persisted, unordered set of records for one entity kind.
#[async_trait]
pub trait Collection<E: Entity>: Send + Sync {
    /// Returns every record of the kind.
    async fn list_all(&self) -> StoreResult<Vec<E>>;

    /// Returns all records where `field == value`.
    async fn find_by_field(&self, field: E::Field, value: FieldValue) -> StoreResult<Vec<E>>;

    /// Persists `record` and returns it unchanged.
    async fn insert(&self, record: E) -> StoreResult<E>;

    /// Atomically issues the next identifier for this kind.
    async fn next_sequence(&self) -> StoreResult<EntityId>;
}
