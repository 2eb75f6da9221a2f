//! Identifier allocation for newly inserted entities.
//!
//! # Invariants
//! - `CountPlusOne` reads the collection size and returns `size + 1`. The
//!   read and the later insert are two separate storage calls, so concurrent
//!   allocations on one kind can return the same id.
//! - `Sequence` delegates to the collection's atomic counter and never
//!   returns the same id twice for one kind.

use crate::model::entity::{Entity, EntityId};
use crate::repo::entity_repo::EntityRepository;
use crate::store::{StoreError, StoreResult};
use log::info;
use serde::{Deserialize, Serialize};

/// How new entity ids are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `count(existing) + 1`. Racy; kept for compatibility.
    CountPlusOne,
    /// Atomic per-kind counter issued by the storage collection.
    #[default]
    Sequence,
}

/// Computes the id for a record about to be inserted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAllocator {
    strategy: IdStrategy,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub async fn allocate<E: Entity>(&self, repo: &EntityRepository<E>) -> StoreResult<EntityId> {
        let id = match self.strategy {
            IdStrategy::CountPlusOne => {
                let count = repo.count().await?;
                EntityId::try_from(count)
                    .map(|count| count + 1)
                    .map_err(|_| StoreError::InvalidData(format!("record count {count} overflows id")))?
            }
            IdStrategy::Sequence => repo.next_sequence().await?,
        };
        info!(
            "event=id_allocated module=service status=ok kind={} strategy={:?} id={id}",
            E::KIND,
            self.strategy
        );
        Ok(id)
    }
}
