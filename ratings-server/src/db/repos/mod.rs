//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Conditional inserts instead of check-then-insert
//! - Uses transactions for multi-step operations

pub mod teachers;

pub use teachers::{ReviewSummary, TeacherRepo, TeacherWithReviews};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("teacher already exists with id {id}")]
    Duplicate { id: i64 },
}
