//! Expense resolution and safe mutation.
//!
//! - `validate`: strict `YYYY-MM-DD` parsing and range checks
//! - `resolve`: turns an id or a set of identifying filters into zero, one or
//!   many of the caller's expenses
//! - `mutate`: sparse edits and deletions that re-check ownership before
//!   writing
//! - `response`: the fixed status vocabulary returned to the agent
//!
//! Everything here is generic over [`ExpenseRepository`](crate::db::ExpenseRepository)
//! and knows nothing about MCP.

pub mod mutate;
pub mod resolve;
pub mod response;
pub mod validate;

#[cfg(test)]
mod response_test;

pub use mutate::{DeleteOutcome, EditOutcome, apply_edit, delete_expense, edit_expense};
pub use resolve::{Resolution, resolve};
pub use response::{Status, ToolResponse};
pub use validate::{ValidationError, check_range, non_blank, parse_date};
