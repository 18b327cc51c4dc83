//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Every method takes the owner explicitly; there is no way to read or
//! write an expense without naming whose it is.

use std::future::Future;

use chrono::NaiveDate;

use crate::db::{
    DbResult,
    models::{CategoryTotal, Expense, ExpenseFilter, ExpensePatch, NewExpense},
};

/// Repository for Expense operations.
pub trait ExpenseRepository: Send + Sync {
    /// Insert a new expense and return it with its assigned id.
    fn create(&self, expense: &NewExpense) -> impl Future<Output = DbResult<Expense>> + Send;

    /// Get an expense by id, scoped to its owner.
    ///
    /// Returns `NotFound` both when the id does not exist and when it
    /// belongs to someone else.
    fn get_owned(&self, id: i64, owner: &str)
    -> impl Future<Output = DbResult<Expense>> + Send;

    /// All of the owner's expenses matching the filter, oldest first.
    fn find(
        &self,
        owner: &str,
        filter: &ExpenseFilter,
    ) -> impl Future<Output = DbResult<Vec<Expense>>> + Send;

    /// Per-category totals in an inclusive date range, ordered by category.
    fn totals_by_category(
        &self,
        owner: &str,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<&str>,
    ) -> impl Future<Output = DbResult<Vec<CategoryTotal>>> + Send;

    /// Write the present fields of `patch` to `(id, owner)`.
    fn update(
        &self,
        id: i64,
        owner: &str,
        patch: &ExpensePatch,
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete `(id, owner)`. `NotFound` when nothing was deleted.
    fn delete(&self, id: i64, owner: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Expenses<'a>: ExpenseRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the expense repository.
    fn expenses(&self) -> Self::Expenses<'_>;
}
