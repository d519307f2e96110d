//! Storage-facing core of the expense tracker.
//!
//! [`Engine`] owns the database connection and exposes the list pipeline of
//! both resources plus their writes. Writes never fail with an error: they
//! return a [`MutationResult`] whose [`MutationStatus`] says what happened.

pub use error::EngineError;
pub use expense_group_statuses::ExpenseGroupStatusKind;
pub use expense_groups::ExpenseGroupField;
pub use expenses::ExpenseField;
pub use mutation::{MutationResult, MutationStatus};
pub use ops::{Engine, EngineBuilder, ExpenseGroupFilter};
pub use patch::apply_patch;

pub mod query;

mod error;
mod expense_group_statuses;
mod expense_groups;
mod expenses;
mod mutation;
mod ops;
mod patch;

pub type ResultEngine<T> = Result<T, EngineError>;
