//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server using the Streamable HTTP transport.
//! The server exposes tools for recording, listing, summarizing, editing and
//! deleting a user's expenses, plus the category taxonomy.
//!
//! # Architecture
//!
//! - **server**: Main MCP server coordinator and tool router
//! - **tools**: Tool structs per concern
//!   - ExpenseTools: Expense operations
//!   - CategoryTools: Category taxonomy
//! - **prompt**: Assistant system prompt served as server instructions
//!
//! Tool structs are generic over `D: Database`, using zero-cost
//! abstractions (no dynamic dispatch).

pub mod prompt;
pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::create_mcp_service;
