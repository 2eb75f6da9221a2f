//! Typed entity repository.
//!
//! # Invariants
//! - Absence of matches is an empty vector, never an error.
//! - `insert` returns the record exactly as persisted.
//! - Storage failures propagate unchanged and are not retried.

use crate::model::entity::{Entity, EntityId, FieldValue};
use crate::store::{Collection, MemoryCollection, StoreResult};
use log::{debug, error};
use std::sync::Arc;

/// Accessor over the storage collection of one entity kind.
///
/// Cloning is cheap and shares the underlying collection.
pub struct EntityRepository<E: Entity> {
    collection: Arc<dyn Collection<E>>,
}

impl<E: Entity> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
        }
    }
}

impl<E: Entity> EntityRepository<E> {
    pub fn new(collection: Arc<dyn Collection<E>>) -> Self {
        Self { collection }
    }

    /// Repository over a fresh, empty in-process collection.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCollection::<E>::new()))
    }

    pub async fn list_all(&self) -> StoreResult<Vec<E>> {
        let records = self
            .collection
            .list_all()
            .await
            .inspect_err(|err| log_failure("repo_list", err))?;
        debug!(
            "event=repo_list module=repo status=ok kind={} count={}",
            E::KIND,
            records.len()
        );
        Ok(records)
    }

    pub async fn find_by_field(
        &self,
        field: E::Field,
        value: impl Into<FieldValue>,
    ) -> StoreResult<Vec<E>> {
        let records = self
            .collection
            .find_by_field(field, value.into())
            .await
            .inspect_err(|err| log_failure("repo_find", err))?;
        debug!(
            "event=repo_find module=repo status=ok kind={} field={field:?} count={}",
            E::KIND,
            records.len()
        );
        Ok(records)
    }

    pub async fn insert(&self, record: E) -> StoreResult<E> {
        let record = self
            .collection
            .insert(record)
            .await
            .inspect_err(|err| log_failure("repo_insert", err))?;
        debug!(
            "event=repo_insert module=repo status=ok kind={} id={}",
            E::KIND,
            record.id()
        );
        Ok(record)
    }

    /// Number of stored records, computed from a full listing.
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.list_all().await?.len())
    }

    pub async fn next_sequence(&self) -> StoreResult<EntityId> {
        self.collection
            .next_sequence()
            .await
            .inspect_err(|err| log_failure("repo_sequence", err))
    }
}

fn log_failure(event: &str, err: &crate::store::StoreError) {
    error!("event={event} module=repo status=error error={err}");
}
