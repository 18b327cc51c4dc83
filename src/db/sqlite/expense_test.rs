//! Tests for SqliteExpenseRepository.

use chrono::NaiveDate;

use crate::db::{
    Database, DbError, ExpenseFilter, ExpensePatch, ExpenseRepository, NewExpense,
    SqliteDatabase,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn new_expense(owner: &str, date: &str, amount: f64, category: &str) -> NewExpense {
    NewExpense {
        user_id: owner.to_string(),
        date: day(date),
        amount,
        category: category.to_string(),
        subcategory: None,
        note: None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_owned_expense() {
    let db = setup_db().await;
    let repo = db.expenses();

    let created = repo
        .create(&NewExpense {
            subcategory: Some("Restaurants".to_string()),
            note: Some("team lunch".to_string()),
            ..new_expense("u1", "2025-11-01", 450.5, "Food")
        })
        .await
        .expect("Create should succeed");
    assert!(created.id > 0);

    let fetched = repo
        .get_owned(created.id, "u1")
        .await
        .expect("Get should succeed");
    assert_eq!(fetched, created);
    assert_eq!(fetched.user_id.as_deref(), Some("u1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_owned_hides_other_owners_rows() {
    let db = setup_db().await;
    let repo = db.expenses();
    let created = repo
        .create(&new_expense("u1", "2025-11-01", 10.0, "Food"))
        .await
        .unwrap();

    let foreign = repo.get_owned(created.id, "u2").await;
    let missing = repo.get_owned(created.id + 100, "u2").await;

    assert!(matches!(foreign, Err(DbError::NotFound { .. })));
    assert!(matches!(missing, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn find_combines_predicates_and_scopes_owner() {
    let db = setup_db().await;
    let repo = db.expenses();
    repo.create(&new_expense("u1", "2025-11-01", 50.0, "Food"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-01", 75.0, "Travel"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-02", 50.0, "Food"))
        .await
        .unwrap();
    repo.create(&new_expense("u2", "2025-11-01", 50.0, "Food"))
        .await
        .unwrap();

    let on_day = repo
        .find("u1", &ExpenseFilter::on_day(day("2025-11-01")))
        .await
        .unwrap();
    assert_eq!(on_day.len(), 2);

    let filter = ExpenseFilter {
        amount: Some(50.0),
        ..ExpenseFilter::on_day(day("2025-11-01"))
    };
    let exact = repo.find("u1", &filter).await.unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].category, "Food");
}

#[tokio::test(flavor = "multi_thread")]
async fn find_matches_category_substring_case_insensitively() {
    let db = setup_db().await;
    let repo = db.expenses();
    repo.create(&new_expense("u1", "2025-11-01", 20.0, "Groceries"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-01", 30.0, "Travel"))
        .await
        .unwrap();

    let filter = ExpenseFilter::default().with_category(Some("GROC".to_string()));
    let found = repo.find("u1", &filter).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category, "Groceries");
}

#[tokio::test(flavor = "multi_thread")]
async fn find_treats_wildcards_literally() {
    let db = setup_db().await;
    let repo = db.expenses();
    repo.create(&new_expense("u1", "2025-11-01", 20.0, "Food"))
        .await
        .unwrap();

    let filter = ExpenseFilter::default().with_category(Some("%".to_string()));
    let found = repo.find("u1", &filter).await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn find_range_is_inclusive_and_ordered_by_date() {
    let db = setup_db().await;
    let repo = db.expenses();
    repo.create(&new_expense("u1", "2025-11-03", 3.0, "C"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-01", 1.0, "A"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-05", 5.0, "E"))
        .await
        .unwrap();

    let found = repo
        .find(
            "u1",
            &ExpenseFilter::between(day("2025-11-01"), day("2025-11-03")),
        )
        .await
        .unwrap();

    let dates: Vec<String> = found.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-11-01", "2025-11-03"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn totals_by_category_groups_and_orders() {
    let db = setup_db().await;
    let repo = db.expenses();
    repo.create(&new_expense("u1", "2025-11-01", 75.0, "Travel"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-01", 50.0, "Food"))
        .await
        .unwrap();
    repo.create(&new_expense("u1", "2025-11-02", 25.25, "Food"))
        .await
        .unwrap();
    repo.create(&new_expense("u2", "2025-11-01", 999.0, "Food"))
        .await
        .unwrap();

    let totals = repo
        .totals_by_category("u1", day("2025-11-01"), day("2025-11-30"), None)
        .await
        .unwrap();

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category, "Food");
    assert_eq!(totals[0].total_amount, 75.25);
    assert_eq!(totals[1].category, "Travel");
    assert_eq!(totals[1].total_amount, 75.0);

    let food_only = repo
        .totals_by_category("u1", day("2025-11-01"), day("2025-11-30"), Some("foo"))
        .await
        .unwrap();
    assert_eq!(food_only.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_writes_only_present_fields() {
    let db = setup_db().await;
    let repo = db.expenses();
    let created = repo
        .create(&NewExpense {
            note: Some("keep me".to_string()),
            ..new_expense("u1", "2025-11-01", 50.0, "Food")
        })
        .await
        .unwrap();

    let patch = ExpensePatch {
        category: Some("Groceries".to_string()),
        ..Default::default()
    };
    repo.update(created.id, "u1", &patch).await.unwrap();

    let updated = repo.get_owned(created.id, "u1").await.unwrap();
    assert_eq!(updated.category, "Groceries");
    assert_eq!(updated.amount, 50.0);
    assert_eq!(updated.note.as_deref(), Some("keep me"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_foreign_owner() {
    let db = setup_db().await;
    let repo = db.expenses();
    let created = repo
        .create(&new_expense("u1", "2025-11-01", 50.0, "Food"))
        .await
        .unwrap();

    let patch = ExpensePatch {
        amount: Some(1.0),
        ..Default::default()
    };
    let result = repo.update(created.id, "u2", &patch).await;

    assert!(matches!(result, Err(DbError::NotFound { .. })));
    let untouched = repo.get_owned(created.id, "u1").await.unwrap();
    assert_eq!(untouched.amount, 50.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_empty_patch_is_rejected() {
    let db = setup_db().await;
    let repo = db.expenses();
    let created = repo
        .create(&new_expense("u1", "2025-11-01", 50.0, "Food"))
        .await
        .unwrap();

    let result = repo
        .update(created.id, "u1", &ExpensePatch::default())
        .await;

    assert!(matches!(result, Err(DbError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_is_scoped_to_owner() {
    let db = setup_db().await;
    let repo = db.expenses();
    let created = repo
        .create(&new_expense("u1", "2025-11-01", 50.0, "Food"))
        .await
        .unwrap();

    assert!(matches!(
        repo.delete(created.id, "u2").await,
        Err(DbError::NotFound { .. })
    ));
    repo.delete(created.id, "u1").await.expect("owner can delete");
    assert!(matches!(
        repo.delete(created.id, "u1").await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_non_finite_amount() {
    let db = setup_db().await;
    let result = db
        .expenses()
        .create(&new_expense("u1", "2025-11-01", f64::NAN, "Food"))
        .await;

    assert!(matches!(result, Err(DbError::Validation { .. })));
}
