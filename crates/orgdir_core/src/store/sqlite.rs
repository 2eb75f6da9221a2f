//! SQLite-backed collections.
//!
//! # Responsibility
//! - Map each entity kind onto its table.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - One connection is shared by all collections opened on it; every
//!   statement runs under its mutex on the blocking thread pool.
//! - Sequence reads and writes happen inside one transaction.

use super::{next_sequence_after, Collection, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::department::{Department, DepartmentField};
use crate::model::employee::{Employee, EmployeeField};
use crate::model::entity::{Entity, EntityId, FieldValue};
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Connection handle shared between the collections of one database.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Opens (and migrates) a database file as a shareable connection.
pub fn open_shared(path: impl AsRef<Path>) -> StoreResult<SharedConnection> {
    Ok(Arc::new(Mutex::new(open_db(path)?)))
}

/// Opens a database file on the blocking pool, keeping file I/O and
/// migrations off the async executor.
pub async fn open_shared_async(path: PathBuf) -> StoreResult<SharedConnection> {
    tokio::task::spawn_blocking(move || open_shared(path))
        .await
        .map_err(|err| StoreError::Unavailable(format!("blocking open failed: {err}")))?
}

/// Opens (and migrates) an in-memory database as a shareable connection.
pub fn open_shared_in_memory() -> StoreResult<SharedConnection> {
    Ok(Arc::new(Mutex::new(open_db_in_memory()?)))
}

/// Table mapping for an entity kind.
pub trait SqlEntity: Entity {
    const TABLE: &'static str;
    /// Column order used by both `SELECT` and `INSERT`.
    const COLUMNS: &'static [&'static str];

    fn column(field: Self::Field) -> &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Values in `COLUMNS` order.
    fn to_values(&self) -> Vec<Value>;
}

impl SqlEntity for Department {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn column(field: Self::Field) -> &'static str {
        match field {
            DepartmentField::Id => "id",
            DepartmentField::Name => "name",
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![Value::Integer(self.id), Value::Text(self.name.clone())]
    }
}

impl SqlEntity for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "age", "gender", "salary", "dept_id"];

    fn column(field: Self::Field) -> &'static str {
        match field {
            EmployeeField::Id => "id",
            EmployeeField::Name => "name",
            EmployeeField::Age => "age",
            EmployeeField::Gender => "gender",
            EmployeeField::Salary => "salary",
            EmployeeField::DeptId => "dept_id",
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            gender: row.get("gender")?,
            salary: row.get("salary")?,
            dept_id: row.get("dept_id")?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Text(self.name.clone()),
            Value::Integer(self.age),
            Value::Text(self.gender.clone()),
            Value::Integer(self.salary),
            Value::Integer(self.dept_id),
        ]
    }
}

/// Collection over one table of a shared SQLite connection.
pub struct SqliteCollection<E> {
    conn: SharedConnection,
    _kind: PhantomData<fn() -> E>,
}

impl<E: SqlEntity> SqliteCollection<E> {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            _kind: PhantomData,
        }
    }

    /// Runs `work` against the locked connection off the async executor.
    async fn with_conn<T, F>(&self, work: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || work(&mut conn.lock()))
            .await
            .map_err(|err| StoreError::Unavailable(format!("blocking task failed: {err}")))?
    }
}

fn select_sql<E: SqlEntity>() -> String {
    format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

fn collect_rows<E: SqlEntity>(
    conn: &Connection,
    sql: &str,
    bind: Vec<Value>,
) -> StoreResult<Vec<E>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(bind), |row| E::from_row(row))?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn field_to_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Int(value) => Value::Integer(value),
        FieldValue::Text(value) => Value::Text(value),
    }
}

#[async_trait]
impl<E: SqlEntity> Collection<E> for SqliteCollection<E> {
    async fn list_all(&self) -> StoreResult<Vec<E>> {
        self.with_conn(|conn| {
            let sql = format!("{} ORDER BY rowid", select_sql::<E>());
            collect_rows(conn, &sql, Vec::new())
        })
        .await
    }

    async fn find_by_field(&self, field: E::Field, value: FieldValue) -> StoreResult<Vec<E>> {
        // Column affinity would coerce a mistyped bind (`1` vs `'1'`) into a match.
        if E::field_type(field) != value.field_type() {
            return Ok(Vec::new());
        }
        let column = E::column(field);
        self.with_conn(move |conn| {
            let sql = format!("{} WHERE {column} = ?1 ORDER BY rowid", select_sql::<E>());
            collect_rows(conn, &sql, vec![field_to_value(value)])
        })
        .await
    }

    async fn insert(&self, record: E) -> StoreResult<E> {
        self.with_conn(move |conn| {
            let placeholders = (1..=E::COLUMNS.len())
                .map(|index| format!("?{index}"))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({placeholders});",
                E::TABLE,
                E::COLUMNS.join(", ")
            );
            conn.execute(&sql, params_from_iter(record.to_values()))?;
            Ok(record)
        })
        .await
    }

    async fn next_sequence(&self) -> StoreResult<EntityId> {
        self.with_conn(|conn| {
            let kind = E::KIND.as_str();
            let tx = conn.transaction()?;
            let last_issued: EntityId = tx.query_row(
                "SELECT COALESCE((SELECT last_id FROM id_sequences WHERE kind = ?1), 0);",
                [kind],
                |row| row.get(0),
            )?;
            let max_id: EntityId = tx.query_row(
                &format!("SELECT COALESCE(MAX(id), 0) FROM {};", E::TABLE),
                [],
                |row| row.get(0),
            )?;
            let next = next_sequence_after(last_issued, max_id)?;
            tx.execute(
                "INSERT INTO id_sequences (kind, last_id) VALUES (?1, ?2)
                 ON CONFLICT(kind) DO UPDATE SET last_id = excluded.last_id;",
                params![kind, next],
            )?;
            tx.commit()?;
            Ok(next)
        })
        .await
    }
}
