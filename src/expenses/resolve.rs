//! Locating the single expense an edit refers to.

use tracing::debug;

use crate::db::{DbError, DbResult, Expense, ExpenseFilter, ExpenseRepository};

/// Result of trying to pin down one of the owner's expenses.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one expense matched.
    Unique(Expense),
    /// The explicit id does not exist or belongs to another user.
    /// Both cases share this variant.
    NotFoundOrNotOwned { id: i64 },
    /// The filters matched nothing.
    NoMatch,
    /// Several expenses matched; the caller has to pick one.
    Ambiguous(Vec<Expense>),
    /// No identifying filter was given.
    NeedsInput { field: &'static str },
}

/// Map `NotFound` to `None`, leaving other errors alone.
pub(crate) fn found<T>(result: DbResult<T>) -> DbResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DbError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Resolve an explicit id or a conjunctive filter to the owner's expense.
///
/// An explicit id wins over any filter. Without one, the filter must carry
/// at least one of date, amount or category; otherwise the store is not
/// queried at all. Multiple matches are never narrowed down here.
pub async fn resolve<R: ExpenseRepository>(
    repo: &R,
    owner: &str,
    id: Option<i64>,
    filter: &ExpenseFilter,
) -> DbResult<Resolution> {
    if let Some(id) = id {
        let resolution = match found(repo.get_owned(id, owner).await)? {
            Some(expense) => Resolution::Unique(expense),
            None => Resolution::NotFoundOrNotOwned { id },
        };
        return Ok(resolution);
    }

    if filter.is_unidentifying() {
        return Ok(Resolution::NeedsInput {
            field: filter.first_missing_field(),
        });
    }

    let mut matches = repo.find(owner, filter).await?;
    debug!(owner, matches = matches.len(), "Resolved expense filter");

    Ok(match matches.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Unique(matches.remove(0)),
        _ => Resolution::Ambiguous(matches),
    })
}
