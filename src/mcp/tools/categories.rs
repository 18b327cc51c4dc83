//! Category taxonomy, served as the `get_categories` tool and as the
//! `expense://categories` resource.
//!
//! The taxonomy is advisory: expenses accept any category string. It is
//! served so the agent can map what the user says onto known names.

use std::path::PathBuf;

use miette::Diagnostic;
use rmcp::{
    ErrorData as McpError,
    model::{
        AnnotateAble, CallToolResult, RawResource, ReadResourceResult, Resource,
        ResourceContents,
    },
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::json_content;

/// URI the taxonomy resource is listed under.
pub const CATEGORIES_URI: &str = "expense://categories";

const CATEGORIES_MIME: &str = "application/json";

/// Taxonomy shipped with the binary, used when no file is configured.
pub const DEFAULT_CATEGORIES: &str = include_str!("../../../data/categories.json");

#[derive(Error, Diagnostic, Debug)]
pub enum CategoryError {
    #[error("Failed to read categories file {path}: {source}")]
    #[diagnostic(code(kharcha::categories::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Categories file is not valid JSON: {0}")]
    #[diagnostic(
        code(kharcha::categories::parse),
        help("The file should map category names to lists of subcategories")
    )]
    Parse(#[from] serde_json::Error),
}

/// Serves the category taxonomy, from a file or the bundled default.
#[derive(Clone, Debug, Default)]
pub struct CategoryTools {
    path: Option<PathBuf>,
}

impl CategoryTools {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Read and parse the taxonomy. The file is re-read on every call so
    /// edits show up without a restart.
    pub async fn load(&self) -> Result<Value, CategoryError> {
        let raw = match &self.path {
            Some(path) => {
                debug!(path = %path.display(), "Loading categories");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CategoryError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            None => DEFAULT_CATEGORIES.to_string(),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    async fn load_for_request(&self) -> Result<Value, McpError> {
        self.load().await.map_err(|e| {
            McpError::internal_error(
                "categories_error",
                Some(serde_json::json!({"error": e.to_string()})),
            )
        })
    }

    pub async fn get_categories(&self) -> Result<CallToolResult, McpError> {
        json_content(&self.load_for_request().await?)
    }

    /// Listing entry for `resources/list`.
    pub fn resource(&self) -> Resource {
        RawResource::new(CATEGORIES_URI, "categories")
            .with_description("Category and subcategory taxonomy for expenses")
            .with_mime_type(CATEGORIES_MIME)
            .no_annotation()
    }

    /// Contents for `resources/read`. Any other URI is `resource_not_found`.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        if uri != CATEGORIES_URI {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(serde_json::json!({"uri": uri})),
            ));
        }

        let categories = self.load_for_request().await?;
        let text = serde_json::to_string_pretty(&categories).map_err(|e| {
            McpError::internal_error(
                "serialization_error",
                Some(serde_json::json!({"error": e.to_string()})),
            )
        })?;

        Ok(ReadResourceResult::new(vec![
            ResourceContents::text(text, CATEGORIES_URI).with_mime_type(CATEGORIES_MIME),
        ]))
    }
}
