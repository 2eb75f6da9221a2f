//! Repository layer over storage collections.
//!
//! # Responsibility
//! - Give services one typed accessor per entity kind.
//! - Keep collection implementations swappable behind `Collection`.

pub mod entity_repo;
