#![allow(dead_code)]

use async_trait::async_trait;
use orgdir_core::{
    Collection, Department, Employee, Entity, EntityId, FieldValue, MemoryCollection,
    NewEmployee, StoreResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;

pub fn new_employee(name: &str, dept_id: EntityId) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        age: 30,
        gender: "F".to_string(),
        salary: 1000,
        dept_id,
    }
}

pub fn employee(id: EntityId, name: &str, dept_id: EntityId) -> Employee {
    new_employee(name, dept_id).into_record(id)
}

pub fn ann(id: EntityId) -> Employee {
    employee(id, "Ann", 1)
}

pub fn eng() -> Department {
    Department::new(1, "Eng")
}

/// Holds the first `gated` listings at a barrier until all of them have read.
///
/// Forces two count-then-insert sequences to interleave: both counts are
/// taken before either insert runs.
pub struct GatedCollection<E> {
    inner: MemoryCollection<E>,
    remaining: AtomicUsize,
    gate: Barrier,
}

impl<E: Entity> GatedCollection<E> {
    pub fn new(gated: usize) -> Self {
        Self {
            inner: MemoryCollection::new(),
            remaining: AtomicUsize::new(gated),
            gate: Barrier::new(gated),
        }
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for GatedCollection<E> {
    async fn list_all(&self) -> StoreResult<Vec<E>> {
        let records = self.inner.list_all().await?;
        let gated = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if gated {
            self.gate.wait().await;
        }
        Ok(records)
    }

    async fn find_by_field(&self, field: E::Field, value: FieldValue) -> StoreResult<Vec<E>> {
        self.inner.find_by_field(field, value).await
    }

    async fn insert(&self, record: E) -> StoreResult<E> {
        self.inner.insert(record).await
    }

    async fn next_sequence(&self) -> StoreResult<EntityId> {
        self.inner.next_sequence().await
    }
}

/// Counts secondary lookups so tests can assert resolution laziness.
pub struct CountingCollection<E> {
    inner: MemoryCollection<E>,
    finds: AtomicUsize,
}

impl<E: Entity> CountingCollection<E> {
    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            inner: MemoryCollection::with_records(records),
            finds: AtomicUsize::new(0),
        }
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for CountingCollection<E> {
    async fn list_all(&self) -> StoreResult<Vec<E>> {
        self.inner.list_all().await
    }

    async fn find_by_field(&self, field: E::Field, value: FieldValue) -> StoreResult<Vec<E>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_field(field, value).await
    }

    async fn insert(&self, record: E) -> StoreResult<E> {
        self.inner.insert(record).await
    }

    async fn next_sequence(&self) -> StoreResult<EntityId> {
        self.inner.next_sequence().await
    }
}
