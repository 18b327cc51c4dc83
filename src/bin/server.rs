//! Kharcha MCP server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the server. The API and MCP layers remain agnostic of the storage
//! backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use kharcha::api::{self, ApiError, Config};
use kharcha::db::{Database, DbError, SqliteDatabase};
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(kharcha::binary::database))]
    Database(#[from] DbError),

    #[error("Server error: {0}")]
    #[diagnostic(code(kharcha::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "kharcha-mcp")]
#[command(author, version, about = "Expense tracking MCP server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "KHARCHA_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "KHARCHA_PORT", default_value = "8000")]
    port: u16,

    /// SQLite connection URL; the file is created if missing
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://kharcha.db")]
    database_url: String,

    /// Category taxonomy JSON file (defaults to the bundled taxonomy)
    #[arg(long, env = "KHARCHA_CATEGORIES")]
    categories: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    info!(url = %cli.database_url, "Opening database");
    let db = SqliteDatabase::connect(&cli.database_url).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    info!("Database migrations complete");

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
            categories: cli.categories,
        },
        db,
    )
    .await?;

    Ok(())
}
