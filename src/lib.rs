//! Per-user expense tracking exposed as MCP tools.
//!
//! - [`db`]: storage traits and the SQLite implementation
//! - [`expenses`]: validation, record resolution, safe mutation and response shaping
//! - [`mcp`]: the MCP server, its tools and the assistant prompt
//! - [`api`]: HTTP hosting for the MCP endpoint

pub mod api;
pub mod db;
pub mod expenses;
pub mod mcp;
