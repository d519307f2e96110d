//! Outcome of write operations.

use sea_orm::DbErr;

/// What a write did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationStatus {
    Created,
    Updated,
    Deleted,
    NotFound,
    /// The store rejected the write, e.g. a foreign key did not match.
    Error,
}

/// Status of a write plus the affected entity, when there is one.
///
/// `Deleted` carries the entity as it was before removal.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationResult<T> {
    pub entity: Option<T>,
    pub status: MutationStatus,
}

impl<T> MutationResult<T> {
    pub fn created(entity: T) -> Self {
        Self {
            entity: Some(entity),
            status: MutationStatus::Created,
        }
    }

    pub fn updated(entity: T) -> Self {
        Self {
            entity: Some(entity),
            status: MutationStatus::Updated,
        }
    }

    pub fn deleted(entity: T) -> Self {
        Self {
            entity: Some(entity),
            status: MutationStatus::Deleted,
        }
    }

    pub fn not_found() -> Self {
        Self {
            entity: None,
            status: MutationStatus::NotFound,
        }
    }

    pub fn error() -> Self {
        Self {
            entity: None,
            status: MutationStatus::Error,
        }
    }

    /// Folds a failed write into an `Error` result; the store error is logged
    /// and not returned.
    pub(crate) fn settle(result: Result<Self, DbErr>) -> Self {
        result.unwrap_or_else(|err| {
            tracing::warn!("write rejected by the store: {err}");
            Self::error()
        })
    }
}
