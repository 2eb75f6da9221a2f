//! Domain model for the department/employee directory.
//!
//! # Responsibility
//! - Define the two entity records and their insert-time input shapes.
//! - Expose a typed field vocabulary used by storage lookups.
//!
//! # Invariants
//! - Records carry only their declared fields; relationships are never stored
//!   on a record, they are resolved at read time.
//! - `id` values are expected but not guaranteed to be unique per kind.

pub mod department;
pub mod employee;
pub mod entity;
