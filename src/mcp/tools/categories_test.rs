//! Tests for the category taxonomy tool

use rmcp::model::RawContent;
use tempfile::TempDir;

use crate::mcp::tools::CategoryTools;
use crate::mcp::tools::categories::CATEGORIES_URI;

#[tokio::test(flavor = "multi_thread")]
async fn test_default_taxonomy_is_valid_json() {
    let tools = CategoryTools::default();

    let categories = tools.load().await.expect("bundled taxonomy should parse");

    assert!(categories.get("Food").is_some());
    assert!(categories.get("Travel").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_taxonomy_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.json");
    std::fs::write(&path, r#"{"Pets": ["Food", "Vet"]}"#).unwrap();
    let tools = CategoryTools::new(Some(path));

    let result = tools.get_categories().await.unwrap();

    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    let json: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(json["Pets"][1], "Vet");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let tools = CategoryTools::new(Some(dir.path().join("nope.json")));

    assert!(tools.get_categories().await.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.json");
    std::fs::write(&path, "Food, Travel").unwrap();
    let tools = CategoryTools::new(Some(path));

    assert!(tools.load().await.is_err());
}

#[test]
fn test_resource_listing() {
    let resource = CategoryTools::default().resource();

    assert_eq!(resource.uri, CATEGORIES_URI);
    assert_eq!(resource.mime_type.as_deref(), Some("application/json"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resource_reads_configured_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.json");
    std::fs::write(&path, r#"{"Pets": ["Food", "Vet"]}"#).unwrap();
    let tools = CategoryTools::new(Some(path));

    let result = tools.read_resource(CATEGORIES_URI).await.unwrap();

    let text = match &result.contents[0] {
        rmcp::model::ResourceContents::TextResourceContents { text, .. } => text.as_str(),
        _ => panic!("Expected text resource contents"),
    };
    let json: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(json["Pets"][0], "Food");
}
