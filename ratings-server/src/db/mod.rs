//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool handed to handlers via state - no global connection
//! - List operations use JOINs - no N+1 queries
//! - Conditional inserts - no check-then-insert races
//! - Transactions for multi-step operations

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
pub use schema::ensure_schema;
