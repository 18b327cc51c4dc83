//! Database abstraction layer.
//!
//! Expense storage is reached through traits so the MCP layer stays generic
//! over the backend. SQLite (via sqlx) is the only implementation.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Expense, filters, patches, totals)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
mod models;
mod repository;
mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{SqliteDatabase, SqliteExpenseRepository};
