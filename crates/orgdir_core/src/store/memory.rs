//! In-process collection backed by a `tokio` read/write lock.

use super::{next_sequence_after, Collection, StoreResult};
use crate::model::entity::{Entity, EntityId, FieldValue};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug)]
struct State<E> {
    records: Vec<E>,
    last_issued: EntityId,
}

/// Non-persistent collection. Records are kept in insertion order.
#[derive(Debug)]
pub struct MemoryCollection<E> {
    state: RwLock<State<E>>,
}

impl<E: Entity> MemoryCollection<E> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a collection pre-populated with `records`.
    ///
    /// Records are taken as-is, duplicate ids included.
    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            state: RwLock::new(State {
                records,
                last_issued: 0,
            }),
        }
    }
}

impl<E: Entity> Default for MemoryCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for MemoryCollection<E> {
    async fn list_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.state.read().await.records.clone())
    }

    async fn find_by_field(&self, field: E::Field, value: FieldValue) -> StoreResult<Vec<E>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|record| record.matches(field, &value))
            .cloned()
            .collect())
    }

    async fn insert(&self, record: E) -> StoreResult<E> {
        self.state.write().await.records.push(record.clone());
        Ok(record)
    }

    async fn next_sequence(&self) -> StoreResult<EntityId> {
        let mut state = self.state.write().await;
        let max_id = state.records.iter().map(|record| record.id()).max().unwrap_or(0);
        state.last_issued = next_sequence_after(state.last_issued, max_id)?;
        Ok(state.last_issued)
    }
}
