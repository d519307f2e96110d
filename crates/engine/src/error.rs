//! The module contains the errors the engine can return.
//!
//! Sort and patch problems are caller errors and are reported before any
//! write happens; a [`Database`] error is a storage failure.
//!
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid sort: {0}")]
    InvalidSort(String),
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidSort(a), Self::InvalidSort(b)) => a == b,
            (Self::InvalidPatch(a), Self::InvalidPatch(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
