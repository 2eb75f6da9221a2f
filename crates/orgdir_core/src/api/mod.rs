//! Query/mutation surface over the directory service.
//!
//! # Responsibility
//! - Turn an operation name plus JSON arguments into a typed `Operation`.
//! - Execute operations and expand relationship fields only when selected.
//!
//! # Invariants
//! - Argument errors are reported before any storage access.
//! - Business paths never fail; only argument and storage errors surface.

use crate::store::StoreError;
use thiserror::Error;

pub mod operation;
pub mod schema;
pub mod view;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("operation `{operation}` is missing required argument `{argument}`")]
    MissingRequiredArgument {
        operation: &'static str,
        argument: &'static str,
    },
    #[error("argument `{argument}` must be {expected}")]
    InvalidArgument {
        argument: &'static str,
        expected: &'static str,
    },
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}
