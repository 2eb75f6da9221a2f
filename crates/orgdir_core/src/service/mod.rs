//! Core use-case services.
//!
//! # Responsibility
//! - Compose repositories into the directory's read and write paths.
//! - Own identifier allocation and relationship resolution policy.

pub mod directory_service;
pub mod id_allocator;
pub mod resolver;
