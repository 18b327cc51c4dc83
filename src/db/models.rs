//! Domain models for the expense store.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Expense
// =============================================================================

/// A single expense row.
///
/// Serializes to the projection handed back to the agent
/// (`id, date, amount, category, subcategory, note`); the owner never leaves
/// the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    #[serde(skip)]
    pub user_id: Option<String>,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

/// Data required to insert an expense. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Conjunctive filter over one owner's expenses.
///
/// `date` and `amount` match exactly, `category` matches as a
/// case-insensitive substring, `range` is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub date: Option<NaiveDate>,
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub amount: Option<f64>,
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn on_day(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            range: Some((start, end)),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// True when no field that can identify a single expense is set.
    pub fn is_unidentifying(&self) -> bool {
        self.date.is_none() && self.amount.is_none() && self.category.is_none()
    }

    /// First identifying field that is absent, in asking order.
    pub fn first_missing_field(&self) -> &'static str {
        if self.date.is_none() {
            "date"
        } else if self.amount.is_none() {
            "amount"
        } else {
            "category"
        }
    }
}

// =============================================================================
// Updates
// =============================================================================

/// Sparse update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Names of the columns this patch writes, in column order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.date.is_some() {
            fields.push("date");
        }
        if self.amount.is_some() {
            fields.push("amount");
        }
        if self.category.is_some() {
            fields.push("category");
        }
        if self.subcategory.is_some() {
            fields.push("subcategory");
        }
        if self.note.is_some() {
            fields.push("note");
        }
        fields
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Sum of amounts for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
}
