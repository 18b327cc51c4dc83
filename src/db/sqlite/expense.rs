//! SQLite ExpenseRepository implementation.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::helpers::contains_pattern;
use crate::db::{
    CategoryTotal, DbError, DbResult, Expense, ExpenseFilter, ExpensePatch, ExpenseRepository,
    NewExpense,
};

const SELECT_EXPENSE: &str =
    "SELECT id, user_id, date, amount, category, subcategory, note FROM expenses";

/// SQLx-backed expense repository.
pub struct SqliteExpenseRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn expense_from_row(row: &SqliteRow) -> DbResult<Expense> {
    Ok(Expense {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        date: row.try_get("date")?,
        amount: row.try_get("amount")?,
        category: row.try_get("category")?,
        subcategory: row.try_get("subcategory")?,
        note: row.try_get("note")?,
    })
}

/// Append ` AND category LIKE ? ESCAPE '\'` for a substring match.
fn push_category_match(qb: &mut QueryBuilder<'_, Sqlite>, category: &str) {
    qb.push(" AND category LIKE ")
        .push_bind(contains_pattern(category))
        .push(" ESCAPE '\\'");
}

impl<'a> ExpenseRepository for SqliteExpenseRepository<'a> {
    async fn create(&self, expense: &NewExpense) -> DbResult<Expense> {
        if !expense.amount.is_finite() {
            return Err(DbError::Validation {
                message: format!("amount must be a finite number, got {}", expense.amount),
            });
        }

        let result = sqlx::query(
            "INSERT INTO expenses (user_id, date, amount, category, subcategory, note) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&expense.user_id)
        .bind(expense.date)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.subcategory)
        .bind(&expense.note)
        .execute(self.pool)
        .await?;

        Ok(Expense {
            id: result.last_insert_rowid(),
            user_id: Some(expense.user_id.clone()),
            date: expense.date,
            amount: expense.amount,
            category: expense.category.clone(),
            subcategory: expense.subcategory.clone(),
            note: expense.note.clone(),
        })
    }

    async fn get_owned(&self, id: i64, owner: &str) -> DbResult<Expense> {
        let row = sqlx::query(&format!("{} WHERE id = ? AND user_id = ?", SELECT_EXPENSE))
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| DbError::expense_not_found(id))?;
        expense_from_row(&row)
    }

    async fn find(&self, owner: &str, filter: &ExpenseFilter) -> DbResult<Vec<Expense>> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_EXPENSE);
        qb.push(" WHERE user_id = ").push_bind(owner);

        if let Some(date) = filter.date {
            qb.push(" AND date = ").push_bind(date);
        }
        if let Some((start, end)) = filter.range {
            qb.push(" AND date BETWEEN ")
                .push_bind(start)
                .push(" AND ")
                .push_bind(end);
        }
        if let Some(amount) = filter.amount {
            qb.push(" AND amount = ").push_bind(amount);
        }
        if let Some(category) = &filter.category {
            push_category_match(&mut qb, category);
        }
        qb.push(" ORDER BY date ASC, id ASC");

        let rows = qb.build().fetch_all(self.pool).await?;
        rows.iter().map(expense_from_row).collect()
    }

    async fn totals_by_category(
        &self,
        owner: &str,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<&str>,
    ) -> DbResult<Vec<CategoryTotal>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT category, SUM(amount) AS total_amount FROM expenses WHERE user_id = ",
        );
        qb.push_bind(owner)
            .push(" AND date BETWEEN ")
            .push_bind(start)
            .push(" AND ")
            .push_bind(end);

        if let Some(category) = category {
            push_category_match(&mut qb, category);
        }
        qb.push(" GROUP BY category ORDER BY category");

        let rows = qb.build().fetch_all(self.pool).await?;
        rows.iter()
            .map(|row| {
                Ok(CategoryTotal {
                    category: row.try_get("category")?,
                    total_amount: row.try_get("total_amount")?,
                })
            })
            .collect()
    }

    async fn update(&self, id: i64, owner: &str, patch: &ExpensePatch) -> DbResult<()> {
        if patch.is_empty() {
            return Err(DbError::Validation {
                message: "update must set at least one field".to_string(),
            });
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE expenses SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(date) = patch.date {
                set.push("date = ").push_bind_unseparated(date);
            }
            if let Some(amount) = patch.amount {
                set.push("amount = ").push_bind_unseparated(amount);
            }
            if let Some(category) = &patch.category {
                set.push("category = ").push_bind_unseparated(category);
            }
            if let Some(subcategory) = &patch.subcategory {
                set.push("subcategory = ").push_bind_unseparated(subcategory);
            }
            if let Some(note) = &patch.note {
                set.push("note = ").push_bind_unseparated(note);
            }
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND user_id = ")
            .push_bind(owner);

        let result = qb.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::expense_not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64, owner: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::expense_not_found(id));
        }

        Ok(())
    }
}
