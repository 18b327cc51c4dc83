//! Sparse edits and deletions of a single expense.
//!
//! Every write is scoped to `(id, owner)` and preceded by a fresh ownership
//! check, even when the id came out of [`resolve`] a moment earlier. The
//! check narrows the window for concurrent changes but does not close it;
//! there is no locking around resolve-then-write.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::resolve::{Resolution, found, resolve};
use crate::db::{DbResult, Expense, ExpenseFilter, ExpensePatch, ExpenseRepository};

/// Everything an edit request can end in.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Updated {
        expense: Expense,
        updated_fields: Vec<&'static str>,
    },
    /// Neither id nor any identifying filter was given.
    NeedsTarget { field: &'static str },
    NoMatch,
    Ambiguous(Vec<Expense>),
    /// Unknown id or someone else's expense.
    NotOwned { id: i64 },
    /// The patch was empty.
    NeedsFields,
}

/// Everything a delete request can end in.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted { expense: Expense },
    DeletedOnDay { expense: Expense },
    /// Unknown id or someone else's expense.
    NotOwned { id: i64 },
    /// No id and no date.
    MissingDate,
    NoExpenseOnDay { date: NaiveDate },
    /// More than one expense matched the day (and category).
    Ambiguous {
        date: NaiveDate,
        options: Vec<Expense>,
    },
    /// The category matched nothing that day; these are the day's expenses.
    NoCategoryMatch {
        date: NaiveDate,
        category: String,
        options: Vec<Expense>,
    },
}

/// Apply `patch` to `(id, owner)` and return the stored result.
pub async fn apply_edit<R: ExpenseRepository>(
    repo: &R,
    owner: &str,
    id: i64,
    patch: &ExpensePatch,
) -> DbResult<EditOutcome> {
    if found(repo.get_owned(id, owner).await)?.is_none() {
        return Ok(EditOutcome::NotOwned { id });
    }

    if patch.is_empty() {
        return Ok(EditOutcome::NeedsFields);
    }

    if found(repo.update(id, owner, patch).await)?.is_none() {
        return Ok(EditOutcome::NotOwned { id });
    }

    let Some(expense) = found(repo.get_owned(id, owner).await)? else {
        return Ok(EditOutcome::NotOwned { id });
    };

    let updated_fields = patch.changed_fields();
    info!(owner, id, fields = ?updated_fields, "Expense updated");

    Ok(EditOutcome::Updated {
        expense,
        updated_fields,
    })
}

/// Resolve the target of an edit, then apply the patch to it.
pub async fn edit_expense<R: ExpenseRepository>(
    repo: &R,
    owner: &str,
    id: Option<i64>,
    filter: &ExpenseFilter,
    patch: &ExpensePatch,
) -> DbResult<EditOutcome> {
    match resolve(repo, owner, id, filter).await? {
        Resolution::Unique(expense) => apply_edit(repo, owner, expense.id, patch).await,
        Resolution::NotFoundOrNotOwned { id } => Ok(EditOutcome::NotOwned { id }),
        Resolution::NoMatch => Ok(EditOutcome::NoMatch),
        Resolution::Ambiguous(options) => Ok(EditOutcome::Ambiguous(options)),
        Resolution::NeedsInput { field } => Ok(EditOutcome::NeedsTarget { field }),
    }
}

/// Delete by id, or by day with an optional category substring.
///
/// The id path ignores `date` and `category`. The day path deletes only
/// when exactly one expense matches. When a category was given and matched
/// nothing, the whole day is offered as choices instead.
pub async fn delete_expense<R: ExpenseRepository>(
    repo: &R,
    owner: &str,
    id: Option<i64>,
    date: Option<NaiveDate>,
    category: Option<String>,
) -> DbResult<DeleteOutcome> {
    if let Some(id) = id {
        return delete_owned(repo, owner, id, |expense| DeleteOutcome::Deleted { expense }).await;
    }

    let Some(date) = date else {
        return Ok(DeleteOutcome::MissingDate);
    };

    let filter = ExpenseFilter::on_day(date).with_category(category.clone());
    let mut matches = repo.find(owner, &filter).await?;
    debug!(owner, %date, matches = matches.len(), "Delete candidates");

    match matches.len() {
        1 => {
            let expense = matches.remove(0);
            delete_owned(repo, owner, expense.id, |expense| {
                DeleteOutcome::DeletedOnDay { expense }
            })
            .await
        }
        0 => {
            let Some(category) = category else {
                return Ok(DeleteOutcome::NoExpenseOnDay { date });
            };
            let same_day = repo.find(owner, &ExpenseFilter::on_day(date)).await?;
            if same_day.is_empty() {
                Ok(DeleteOutcome::NoExpenseOnDay { date })
            } else {
                Ok(DeleteOutcome::NoCategoryMatch {
                    date,
                    category,
                    options: same_day,
                })
            }
        }
        _ => Ok(DeleteOutcome::Ambiguous {
            date,
            options: matches,
        }),
    }
}

/// Re-check `(id, owner)`, delete it, and wrap the removed row.
async fn delete_owned<R: ExpenseRepository>(
    repo: &R,
    owner: &str,
    id: i64,
    deleted: impl FnOnce(Expense) -> DeleteOutcome,
) -> DbResult<DeleteOutcome> {
    let Some(expense) = found(repo.get_owned(id, owner).await)? else {
        return Ok(DeleteOutcome::NotOwned { id });
    };

    if found(repo.delete(id, owner).await)?.is_none() {
        return Ok(DeleteOutcome::NotOwned { id });
    }

    info!(owner, id, "Expense deleted");
    Ok(deleted(expense))
}
