//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `MutationService`.
///
/// `NotFound` and `InvalidField` are permanent for the given input; callers
/// surface them and must not retry. Transient infrastructure failures arrive
/// as `Storage` and are the data-access collaborator's concern to retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MutationError {
    #[error("target record not found")]
    NotFound,

    #[error("field {0:?} is not recognized for the target's subject")]
    InvalidField(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `OverviewService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverviewError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
