//! `audit-history` entry point
//!
//! Run with:
//! ```bash
//! cargo run -p audit-cli -- --schema demos/schema.json show Person 3
//! ```
//!
//! Database and formatting settings are loaded from environment variables
//! (or a `.env` file); entity schemas come from the `--schema` file.

use std::sync::Arc;

use anyhow::Context;
use audit_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use audit_db::{create_pool, DatabaseConfig, PgAuditStore, PgEntityLookup, PgUserDirectory};
use audit_service::dto::{HistoryRequest, RecentChangesRequest};
use audit_service::{HistoryService, SchemaRegistry, ServiceContext, ServiceContextBuilder};
use clap::Parser;
use tracing::{debug, error, info};

mod cli;
mod output;
mod schema_file;

use cli::{Cli, Commands};
use schema_file::SchemaFile;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("audit-history error: {e}");
            std::process::exit(AppError::Config(e.to_string()).exit_code());
        }
    };

    let mut tracing = TracingConfig::for_environment(config.app.env);
    if cli.verbose {
        tracing = tracing.verbose();
    }
    if let Err(e) = try_init_tracing_with_config(tracing) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(cli, config).await {
        error!(error = %e, "Command failed");
        eprintln!("audit-history error: {e:#}");
        let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let schema_file = SchemaFile::load(&cli.schema).map_err(config_error)?;
    let schemas = schema_file.registry().map_err(config_error)?;
    let ctx = build_context(&config, &schema_file, schemas).await?;
    debug!(?ctx, "Service context ready");

    let service = HistoryService::new(&ctx);
    let datetime_format = config.history.datetime_format.as_str();

    match cli.command {
        Commands::Show {
            entity_type,
            record_id,
            fields,
            excluded_fields,
        } => {
            let mut request = HistoryRequest::new(entity_type, record_id);
            if !fields.is_empty() {
                request = request.with_fields(fields);
            }
            request.excluded_fields = excluded_fields;

            let response = service.history(request).await.map_err(AppError::from)?;
            output::output(&response, cli.format, datetime_format)
        }
        Commands::Recent { entity_type, limit } => {
            let response = service
                .recent_changes(RecentChangesRequest::new(entity_type, limit))
                .await
                .map_err(AppError::from)?;
            output::output(&response, cli.format, datetime_format)
        }
    }
}

fn config_error(e: anyhow::Error) -> AppError {
    AppError::Config(format!("{e:#}"))
}

async fn build_context(
    config: &AppConfig,
    schema_file: &SchemaFile,
    schemas: SchemaRegistry,
) -> anyhow::Result<ServiceContext> {
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .context("failed to connect to database")?;
    info!(
        env = ?config.app.env,
        audit_table = %config.audit.table,
        "Connected to database"
    );

    let audit_store = PgAuditStore::with_table(pool.clone(), &config.audit.table)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let tables = schema_file.entity_tables().map_err(config_error)?;
    let entity_lookup = PgEntityLookup::new(pool.clone(), tables);
    let user_directory = PgUserDirectory::new(
        pool,
        &config.audit.users_table,
        &config.audit.users_name_column,
    )
    .map_err(|e| AppError::Config(e.to_string()))?;

    let ctx = ServiceContextBuilder::new()
        .audit_store(Arc::new(audit_store))
        .entity_lookup(Arc::new(entity_lookup))
        .user_directory(Arc::new(user_directory))
        .schemas(Arc::new(schemas))
        .history_config(&config.history)
        .build()
        .map_err(AppError::from)?;

    Ok(ctx)
}
