//! Expense tool implementations
//!
//! Handles all MCP tools for expense operations. Every tool is scoped to the
//! `user_id` it is called with; nothing reads or writes another user's rows.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, schemars,
    schemars::JsonSchema,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{map_db_error, respond};
use crate::db::{Database, ExpenseFilter, ExpensePatch, ExpenseRepository, NewExpense};
use crate::expenses::{
    self, ToolResponse, ValidationError, check_range, non_blank, parse_date,
};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct AddExpenseParams {
    #[schemars(description = "ID of the user the expense belongs to")]
    pub user_id: String,
    #[schemars(description = "Date of the expense (YYYY-MM-DD). Required.")]
    pub date: Option<String>,
    #[schemars(description = "Amount spent. Required.")]
    pub amount: Option<f64>,
    #[schemars(description = "Category from get_categories. Required.")]
    pub category: Option<String>,
    #[schemars(description = "Subcategory (optional)")]
    pub subcategory: Option<String>,
    #[schemars(description = "Free-text note (optional)")]
    pub note: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListExpensesParams {
    #[schemars(description = "ID of the user whose expenses to list")]
    pub user_id: String,
    #[schemars(description = "List a single day (YYYY-MM-DD). Takes precedence over a range.")]
    pub date: Option<String>,
    #[schemars(description = "Range start (YYYY-MM-DD, inclusive)")]
    pub start_date: Option<String>,
    #[schemars(description = "Range end (YYYY-MM-DD, inclusive)")]
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    #[schemars(description = "ID of the user whose expenses to summarize")]
    pub user_id: String,
    #[schemars(description = "Range start (YYYY-MM-DD, inclusive)")]
    pub start_date: Option<String>,
    #[schemars(description = "Range end (YYYY-MM-DD, inclusive)")]
    pub end_date: Option<String>,
    #[schemars(description = "Only include categories containing this text (case-insensitive)")]
    pub category: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct EditExpenseParams {
    #[schemars(description = "ID of the user who owns the expense")]
    pub user_id: String,
    #[schemars(description = "Expense ID. When given, the filters below are ignored.")]
    pub id: Option<i64>,
    #[schemars(description = "Identify by date (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[schemars(description = "Identify by exact amount")]
    pub amount: Option<f64>,
    #[schemars(description = "Identify by category text (case-insensitive substring)")]
    pub category: Option<String>,
    #[schemars(description = "New date (YYYY-MM-DD)")]
    pub new_date: Option<String>,
    #[schemars(description = "New amount")]
    pub new_amount: Option<f64>,
    #[schemars(description = "New category")]
    pub new_category: Option<String>,
    #[schemars(description = "New subcategory")]
    pub new_subcategory: Option<String>,
    #[schemars(description = "New note")]
    pub new_note: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct DeleteExpenseParams {
    #[schemars(description = "ID of the user who owns the expense")]
    pub user_id: String,
    #[schemars(description = "Expense ID to delete. When given, date and category are ignored.")]
    pub id: Option<i64>,
    #[schemars(description = "Day of the expense (YYYY-MM-DD). Required without an ID.")]
    pub date: Option<String>,
    #[schemars(description = "Narrow the day by category text (case-insensitive substring)")]
    pub category: Option<String>,
}

// =============================================================================
// Expense Tools
// =============================================================================

pub const MISSING_USER: &str = "A user_id is required.";

/// Expense management tools
///
/// Generic over `D: Database` for zero-cost abstraction.
pub struct ExpenseTools<D: Database> {
    db: Arc<D>,
}

// Manual Clone impl - only the Arc is cloned, D itself need not be Clone
impl<D: Database> Clone for ExpenseTools<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

/// Trimmed, non-empty user id.
fn owner_of(user_id: &str) -> Option<&str> {
    let owner = user_id.trim();
    (!owner.is_empty()).then_some(owner)
}

/// Parse an optional, possibly blank date parameter.
fn parse_optional_date(
    value: Option<String>,
) -> Result<Option<chrono::NaiveDate>, ValidationError> {
    non_blank(value).map(|s| parse_date(&s)).transpose()
}

/// Round to two decimal places for display totals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl<D: Database + 'static> ExpenseTools<D> {
    /// Create new ExpenseTools with database
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    pub async fn add_expense(
        &self,
        params: Parameters<AddExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.add(params.0).await?)
    }

    pub async fn list_expenses(
        &self,
        params: Parameters<ListExpensesParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.list(params.0).await?)
    }

    pub async fn summarize(
        &self,
        params: Parameters<SummarizeParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.summary(params.0).await?)
    }

    pub async fn edit_expense(
        &self,
        params: Parameters<EditExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.edit(params.0).await?)
    }

    pub async fn delete_expense(
        &self,
        params: Parameters<DeleteExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.delete(params.0).await?)
    }

    async fn add(&self, params: AddExpenseParams) -> Result<ToolResponse, McpError> {
        let Some(owner) = owner_of(&params.user_id) else {
            return Ok(ToolResponse::error(MISSING_USER));
        };
        info!(user_id = owner, tool = "add_expense", "Tool call");

        let Some(date) = non_blank(params.date) else {
            return Ok(ToolResponse::ask_input(
                "date",
                "Please provide the date of the expense (YYYY-MM-DD)",
            ));
        };
        let Some(amount) = params.amount else {
            return Ok(ToolResponse::ask_input("amount", "How much did you spend?"));
        };
        let Some(category) = non_blank(params.category) else {
            return Ok(ToolResponse::ask_input(
                "category",
                "Please provide the expense category.",
            ));
        };
        let date = match parse_date(&date) {
            Ok(date) => date,
            Err(e) => return Ok(e.into()),
        };

        let created = self
            .db
            .expenses()
            .create(&NewExpense {
                user_id: owner.to_string(),
                date,
                amount,
                category,
                subcategory: non_blank(params.subcategory),
                note: non_blank(params.note),
            })
            .await
            .map_err(map_db_error)?;

        Ok(ToolResponse::ok("Expense added!").with(
            "data",
            json!({
                "id": created.id,
                "user_id": owner,
                "date": created.date,
                "amount": created.amount,
                "category": created.category,
            }),
        ))
    }

    async fn list(&self, params: ListExpensesParams) -> Result<ToolResponse, McpError> {
        let Some(owner) = owner_of(&params.user_id) else {
            return Ok(ToolResponse::error(MISSING_USER));
        };
        info!(user_id = owner, tool = "list_expenses", "Tool call");

        if let Some(date) = non_blank(params.date) {
            let date = match parse_date(&date) {
                Ok(date) => date,
                Err(e) => return Ok(e.into()),
            };

            let expenses = self
                .db
                .expenses()
                .find(owner, &ExpenseFilter::on_day(date))
                .await
                .map_err(map_db_error)?;

            if expenses.is_empty() {
                return Ok(ToolResponse::no_data(format!(
                    "No expenses found on {}.",
                    date
                )));
            }

            return Ok(ToolResponse::ok(format!("Expenses on {}.", date))
                .with("mode", "single_date")
                .with("date", date)
                .with("total", expenses.len())
                .with("expenses", expenses));
        }

        let (start, end) = match (non_blank(params.start_date), non_blank(params.end_date)) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => {
                return Ok(ToolResponse::ask_input(
                    "end_date",
                    format!(
                        "You provided start_date ({}). Please also provide end_date.",
                        start
                    ),
                ));
            }
            (None, Some(end)) => {
                return Ok(ToolResponse::ask_input(
                    "start_date",
                    format!(
                        "You provided end_date ({}). Please also provide start_date.",
                        end
                    ),
                ));
            }
            (None, None) => {
                return Ok(ToolResponse::ask_input(
                    "date_or_range",
                    "Please provide a date or a start_date + end_date to list expenses.",
                ));
            }
        };

        let (start, end) = match parse_range(&start, &end) {
            Ok(range) => range,
            Err(e) => return Ok(e.into()),
        };

        let expenses = self
            .db
            .expenses()
            .find(owner, &ExpenseFilter::between(start, end))
            .await
            .map_err(map_db_error)?;

        if expenses.is_empty() {
            return Ok(ToolResponse::no_data(format!(
                "No expenses found between {} and {}.",
                start, end
            )));
        }

        Ok(
            ToolResponse::ok(format!("Expenses from {} to {}.", start, end))
                .with("mode", "range")
                .with("start_date", start)
                .with("end_date", end)
                .with("total", expenses.len())
                .with("expenses", expenses),
        )
    }

    async fn summary(&self, params: SummarizeParams) -> Result<ToolResponse, McpError> {
        let Some(owner) = owner_of(&params.user_id) else {
            return Ok(ToolResponse::error(MISSING_USER));
        };
        info!(user_id = owner, tool = "summarize", "Tool call");

        let (start, end) = match (non_blank(params.start_date), non_blank(params.end_date)) {
            (Some(start), Some(end)) => (start, end),
            (None, None) => {
                return Ok(ToolResponse::ask_input(
                    "start_date",
                    "Please tell me the start date or date range to summarize your expenses (e.g., 2025-11-01).",
                ));
            }
            (Some(start), None) => {
                return Ok(ToolResponse::ask_input(
                    "end_date",
                    format!(
                        "You provided a start date ({}). Please provide the end date too.",
                        start
                    ),
                ));
            }
            (None, Some(end)) => {
                return Ok(ToolResponse::ask_input(
                    "start_date",
                    format!(
                        "You mentioned the end date ({}). Please provide the start date.",
                        end
                    ),
                ));
            }
        };

        let (start, end) = match parse_range(&start, &end) {
            Ok(range) => range,
            Err(e) => return Ok(e.into()),
        };
        let category = non_blank(params.category);

        let breakdown = self
            .db
            .expenses()
            .totals_by_category(owner, start, end, category.as_deref())
            .await
            .map_err(map_db_error)?;

        if breakdown.is_empty() {
            let message = match &category {
                Some(category) => format!(
                    "No expenses found for category '{}' between {} and {}.",
                    category, start, end
                ),
                None => format!("No expenses found between {} and {}.", start, end),
            };
            return Ok(ToolResponse::no_data(message));
        }

        let total: f64 = breakdown.iter().map(|row| row.total_amount).sum();
        let mut message = format!("Here's your expense summary from {} to {}.", start, end);
        if let Some(category) = &category {
            message.push_str(&format!(" (Filtered by category: {})", category));
        }

        Ok(ToolResponse::ok(message)
            .with("total_spent", round2(total))
            .with("breakdown", breakdown))
    }

    async fn edit(&self, params: EditExpenseParams) -> Result<ToolResponse, McpError> {
        let Some(owner) = owner_of(&params.user_id) else {
            return Ok(ToolResponse::error(MISSING_USER));
        };
        info!(user_id = owner, tool = "edit_expense", id = ?params.id, "Tool call");

        // An id overrides the filters, so a malformed date only matters without one.
        let date = if params.id.is_some() {
            None
        } else {
            match parse_optional_date(params.date) {
                Ok(date) => date,
                Err(e) => return Ok(e.into()),
            }
        };
        let new_date = match parse_optional_date(params.new_date) {
            Ok(date) => date,
            Err(_) => {
                return Ok(ToolResponse::error(
                    "Invalid new date format. Use YYYY-MM-DD.",
                ));
            }
        };

        let filter = ExpenseFilter {
            date,
            amount: params.amount,
            category: non_blank(params.category),
            ..Default::default()
        };
        let patch = ExpensePatch {
            date: new_date,
            amount: params.new_amount,
            category: non_blank(params.new_category),
            subcategory: non_blank(params.new_subcategory),
            note: non_blank(params.new_note),
        };

        let outcome =
            expenses::edit_expense(&self.db.expenses(), owner, params.id, &filter, &patch)
                .await
                .map_err(map_db_error)?;

        Ok(outcome.into())
    }

    async fn delete(&self, params: DeleteExpenseParams) -> Result<ToolResponse, McpError> {
        let Some(owner) = owner_of(&params.user_id) else {
            return Ok(ToolResponse::error(MISSING_USER));
        };
        info!(user_id = owner, tool = "delete_expense", id = ?params.id, "Tool call");

        // The id path ignores the day, so a malformed date only matters without one.
        let date = if params.id.is_some() {
            None
        } else {
            match parse_optional_date(params.date) {
                Ok(date) => date,
                Err(e) => return Ok(e.into()),
            }
        };

        let outcome = expenses::delete_expense(
            &self.db.expenses(),
            owner,
            params.id,
            date,
            non_blank(params.category),
        )
        .await
        .map_err(map_db_error)?;

        Ok(outcome.into())
    }
}

/// Parse both bounds and check their order.
fn parse_range(
    start: &str,
    end: &str,
) -> Result<(chrono::NaiveDate, chrono::NaiveDate), ValidationError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    check_range(start, end)?;
    Ok((start, end))
}
