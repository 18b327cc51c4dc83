//! MCP server implementation
//!
//! This module implements the main MCP server coordinator. The tool router
//! is the dispatch table: each `#[tool]` method below is registered under
//! its name with its parameter struct as the accepted schema, and delegates
//! to the tool struct that owns the concern.
//!
//! Besides tools the server exposes the category taxonomy as the
//! `expense://categories` resource and the assistant prompt as the
//! `kharchamind_system_prompt` prompt.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, GetPromptRequestParams, GetPromptResult, ListPromptsResult,
        ListResourcesResult, PaginatedRequestParams, ReadResourceRequestParams,
        ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::db::Database;

use super::prompt::{PROMPT_NAME, prompt_listing, prompt_result, system_prompt};
use super::tools::expenses::{
    AddExpenseParams, DeleteExpenseParams, EditExpenseParams, ListExpensesParams,
    SummarizeParams,
};
use super::tools::{CategoryTools, ExpenseTools};

/// Main MCP server coordinator
///
/// Generic over `D: Database` for zero-cost abstraction (no dynamic dispatch).
pub struct McpServer<D: Database> {
    expense_tools: ExpenseTools<D>,
    category_tools: CategoryTools,
    tool_router: ToolRouter<Self>,
}

impl<D: Database + 'static> Clone for McpServer<D> {
    fn clone(&self) -> Self {
        Self {
            expense_tools: self.expense_tools.clone(),
            category_tools: self.category_tools.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

#[tool_router]
impl<D: Database + 'static> McpServer<D> {
    /// Create a new MCP server
    ///
    /// # Arguments
    /// * `db` - Shared database instance implementing the Database trait
    /// * `categories` - Optional taxonomy file; the bundled one is used otherwise
    pub fn new(db: Arc<D>, categories: Option<PathBuf>) -> Self {
        Self {
            expense_tools: ExpenseTools::new(db),
            category_tools: CategoryTools::new(categories),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Add a new expense for the user. Only date (YYYY-MM-DD), amount and category are mandatory; missing ones are asked for."
    )]
    pub async fn add_expense(
        &self,
        params: Parameters<AddExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        self.expense_tools.add_expense(params).await
    }

    #[tool(
        description = "List the user's expenses for a specific date (date) or for a date range (start_date + end_date)."
    )]
    pub async fn list_expenses(
        &self,
        params: Parameters<ListExpensesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.expense_tools.list_expenses(params).await
    }

    #[tool(
        description = "Summarize the user's total spending per category within a date range, optionally filtered by category."
    )]
    pub async fn summarize(
        &self,
        params: Parameters<SummarizeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.expense_tools.summarize(params).await
    }

    #[tool(
        description = "Edit one of the user's expenses. Identify it by id, or by date, amount and/or category; pass new_* fields for the values to change. Returns ask_choice when several expenses match."
    )]
    pub async fn edit_expense(
        &self,
        params: Parameters<EditExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        self.expense_tools.edit_expense(params).await
    }

    #[tool(
        description = "Delete one of the user's expenses by id, or by date with an optional category. Returns ask_choice when the expense cannot be pinned down."
    )]
    pub async fn delete_expense(
        &self,
        params: Parameters<DeleteExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        self.expense_tools.delete_expense(params).await
    }

    #[tool(
        description = "Get the category and subcategory taxonomy expenses should be filed under."
    )]
    pub async fn get_categories(&self) -> Result<CallToolResult, McpError> {
        self.category_tools.get_categories().await
    }
}

impl<D: Database + 'static> McpServer<D> {
    /// Read a resource by URI. Only the category taxonomy exists.
    pub async fn read_categories(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        self.category_tools.read_resource(uri).await
    }

    /// Render a prompt by name, with today's date injected.
    pub fn prompt(&self, name: &str) -> Result<GetPromptResult, McpError> {
        if name != PROMPT_NAME {
            return Err(McpError::invalid_params(
                "prompt_not_found",
                Some(serde_json::json!({"name": name})),
            ));
        }

        Ok(prompt_result(Local::now().date_naive()))
    }
}

#[tool_handler]
impl<D: Database + 'static> ServerHandler for McpServer<D> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
        )
        .with_instructions(system_prompt(Local::now().date_naive()))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(vec![
            self.category_tools.resource(),
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_categories(&request.uri).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(vec![prompt_listing()]))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.prompt(&request.name)
    }
}
