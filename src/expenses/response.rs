//! Response shaping for tool results.
//!
//! Every outcome becomes a JSON object with a `status` from a fixed
//! vocabulary, a human-readable `message`, and an optional payload.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::mutate::{DeleteOutcome, EditOutcome};
use super::validate::ValidationError;
use crate::db::Expense;

/// Status tags understood by the calling agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    AskInput,
    AskChoice,
    NoData,
    NoMatch,
    NoExpenseOnDay,
    Error,
}

pub const NOT_FOUND_OR_NOT_OWNED: &str =
    "No expense found with this ID, or it does not belong to you.";

/// A tool result as sent back to the agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub message: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ToolResponse {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            field: None,
            message: message.into(),
            payload: Map::new(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Status::Ok, message)
    }

    /// A required input is missing; `field` names it.
    pub fn ask_input(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            ..Self::new(Status::AskInput, message)
        }
    }

    /// Several candidates; the agent has to let the user pick.
    pub fn ask_choice(message: impl Into<String>, options: &[Expense]) -> Self {
        Self::new(Status::AskChoice, message).with("options", options)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(Status::NoData, message)
    }

    pub fn no_match(message: impl Into<String>) -> Self {
        Self::new(Status::NoMatch, message)
    }

    pub fn no_expense_on_day(message: impl Into<String>) -> Self {
        Self::new(Status::NoExpenseOnDay, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Status::Error, message)
    }

    /// Attach a payload entry.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        self.payload.insert(key.to_string(), json!(value));
        self
    }
}

impl From<ValidationError> for ToolResponse {
    fn from(err: ValidationError) -> Self {
        ToolResponse::error(err.to_string())
    }
}

impl From<EditOutcome> for ToolResponse {
    fn from(outcome: EditOutcome) -> Self {
        match outcome {
            EditOutcome::Updated {
                expense,
                updated_fields,
            } => ToolResponse::ok(format!("Expense {} updated successfully.", expense.id))
                .with("updated_fields", updated_fields)
                .with("updated_expense", expense),
            EditOutcome::NeedsTarget { field } => ToolResponse::ask_input(
                field,
                "Please provide a date, category, or amount to identify which expense you want to edit.",
            ),
            EditOutcome::NoMatch => ToolResponse::no_match(
                "No matching expenses found. Please provide a clearer date or amount.",
            ),
            EditOutcome::Ambiguous(options) => ToolResponse::ask_choice(
                "Multiple matching expenses found. Please select which one you want to edit.",
                &options,
            ),
            EditOutcome::NotOwned { .. } => ToolResponse::error(NOT_FOUND_OR_NOT_OWNED),
            EditOutcome::NeedsFields => ToolResponse::ask_input(
                "fields",
                "Please tell me which field(s) you want to update (amount, date, category, note, etc.).",
            ),
        }
    }
}

impl From<DeleteOutcome> for ToolResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted { expense } => {
                ToolResponse::ok(format!("Expense {} deleted successfully.", expense.id))
                    .with("deleted_expense", expense)
            }
            DeleteOutcome::DeletedOnDay { expense } => ToolResponse::ok(format!(
                "Deleted expense on {} in category '{}'.",
                expense.date, expense.category
            ))
            .with("deleted_expense", expense),
            DeleteOutcome::NotOwned { .. } => ToolResponse::error(NOT_FOUND_OR_NOT_OWNED),
            DeleteOutcome::MissingDate => {
                ToolResponse::error("Please provide a date or an expense ID.")
            }
            DeleteOutcome::NoExpenseOnDay { date } => ToolResponse::no_expense_on_day(format!(
                "You have no expenses on {}. Please provide a different date.",
                date
            )),
            DeleteOutcome::Ambiguous { date, options } => ToolResponse::ask_choice(
                format!(
                    "Multiple expenses found on {}. Please choose which one to delete.",
                    date
                ),
                &options,
            ),
            DeleteOutcome::NoCategoryMatch {
                date,
                category,
                options,
            } => ToolResponse::ask_choice(
                format!(
                    "No exact match found for '{}'. Here are your expenses on {}:",
                    category, date
                ),
                &options,
            ),
        }
    }
}
