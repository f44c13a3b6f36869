//! ratings-server: HTTP backend for teacher ratings
//!
//! Records teachers and student reviews in SQLite and keeps each
//! teacher's average rating in step with its reviews.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
