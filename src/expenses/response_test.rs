//! Tests for response shaping.

use chrono::NaiveDate;
use serde_json::json;

use crate::db::Expense;
use crate::expenses::{DeleteOutcome, EditOutcome, Status, ToolResponse, ValidationError};

fn expense(id: i64, category: &str) -> Expense {
    Expense {
        id,
        user_id: Some("u1".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        amount: 50.0,
        category: category.to_string(),
        subcategory: None,
        note: None,
    }
}

#[test]
fn status_serializes_snake_case() {
    let tags: Vec<serde_json::Value> = [
        Status::Ok,
        Status::AskInput,
        Status::AskChoice,
        Status::NoData,
        Status::NoMatch,
        Status::NoExpenseOnDay,
        Status::Error,
    ]
    .iter()
    .map(|s| serde_json::to_value(s).unwrap())
    .collect();

    assert_eq!(
        tags,
        vec![
            json!("ok"),
            json!("ask_input"),
            json!("ask_choice"),
            json!("no_data"),
            json!("no_match"),
            json!("no_expense_on_day"),
            json!("error"),
        ]
    );
}

#[test]
fn ask_input_carries_field_and_message() {
    let value = serde_json::to_value(ToolResponse::ask_input("amount", "How much?")).unwrap();
    assert_eq!(
        value,
        json!({"status": "ask_input", "field": "amount", "message": "How much?"})
    );
}

#[test]
fn payload_is_flattened_and_field_omitted() {
    let value = serde_json::to_value(ToolResponse::ok("done").with("total", 3)).unwrap();
    assert_eq!(value, json!({"status": "ok", "message": "done", "total": 3}));
}

#[test]
fn ask_choice_lists_projections() {
    let value =
        serde_json::to_value(ToolResponse::ask_choice("pick", &[expense(1, "Food")])).unwrap();

    assert_eq!(value["status"], "ask_choice");
    assert_eq!(
        value["options"],
        json!([{
            "id": 1,
            "date": "2025-11-01",
            "amount": 50.0,
            "category": "Food",
            "subcategory": null,
            "note": null,
        }])
    );
}

#[test]
fn validation_error_becomes_error_status() {
    let response: ToolResponse = ValidationError::InvalidDate {
        input: "01/11/2025".to_string(),
    }
    .into();

    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message, "Invalid date format. Use YYYY-MM-DD.");
}

#[test]
fn every_edit_outcome_has_a_status() {
    let cases = vec![
        (
            EditOutcome::Updated {
                expense: expense(1, "Groceries"),
                updated_fields: vec!["category"],
            },
            Status::Ok,
        ),
        (EditOutcome::NeedsTarget { field: "date" }, Status::AskInput),
        (EditOutcome::NoMatch, Status::NoMatch),
        (
            EditOutcome::Ambiguous(vec![expense(1, "A"), expense(2, "B")]),
            Status::AskChoice,
        ),
        (EditOutcome::NotOwned { id: 1 }, Status::Error),
        (EditOutcome::NeedsFields, Status::AskInput),
    ];

    for (outcome, status) in cases {
        let response: ToolResponse = outcome.into();
        assert_eq!(response.status, status);
        assert!(!response.message.is_empty());
    }
}

#[test]
fn updated_edit_carries_fields_and_record() {
    let response: ToolResponse = EditOutcome::Updated {
        expense: expense(1, "Groceries"),
        updated_fields: vec!["category"],
    }
    .into();
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["message"], "Expense 1 updated successfully.");
    assert_eq!(value["updated_fields"], json!(["category"]));
    assert_eq!(value["updated_expense"]["category"], "Groceries");
}

#[test]
fn not_owned_messages_do_not_depend_on_id() {
    let a: ToolResponse = EditOutcome::NotOwned { id: 1 }.into();
    let b: ToolResponse = EditOutcome::NotOwned { id: 999 }.into();
    assert_eq!(a, b);

    let c: ToolResponse = DeleteOutcome::NotOwned { id: 1 }.into();
    let d: ToolResponse = DeleteOutcome::NotOwned { id: 999 }.into();
    assert_eq!(c, d);
}

#[test]
fn every_delete_outcome_has_a_status() {
    let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
    let cases = vec![
        (
            DeleteOutcome::Deleted {
                expense: expense(1, "Food"),
            },
            Status::Ok,
        ),
        (
            DeleteOutcome::DeletedOnDay {
                expense: expense(1, "Food"),
            },
            Status::Ok,
        ),
        (DeleteOutcome::NotOwned { id: 1 }, Status::Error),
        (DeleteOutcome::MissingDate, Status::Error),
        (DeleteOutcome::NoExpenseOnDay { date }, Status::NoExpenseOnDay),
        (
            DeleteOutcome::Ambiguous {
                date,
                options: vec![expense(1, "A"), expense(2, "B")],
            },
            Status::AskChoice,
        ),
        (
            DeleteOutcome::NoCategoryMatch {
                date,
                category: "Health".to_string(),
                options: vec![expense(1, "Food")],
            },
            Status::AskChoice,
        ),
    ];

    for (outcome, status) in cases {
        let response: ToolResponse = outcome.into();
        assert_eq!(response.status, status);
    }
}

#[test]
fn day_delete_confirmation_names_category() {
    let response: ToolResponse = DeleteOutcome::DeletedOnDay {
        expense: expense(1, "Food"),
    }
    .into();

    assert_eq!(
        response.message,
        "Deleted expense on 2025-11-01 in category 'Food'."
    );
    assert_eq!(response.payload["deleted_expense"]["id"], 1);
}
