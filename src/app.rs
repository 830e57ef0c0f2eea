//! One process run: config, connection lifetime, ingest, statistics and the
//! exit code.

use crate::cli::Cli;
use crate::config::Config;
use crate::db::{apply_schema, init_db, Database, BUNDLED_SCHEMA};
use crate::pipeline::{self, log_statistics, log_summary, statistics, RentalSink, Tables};
use crate::report::TracingReporter;
use crate::scraper::{HttpTransport, UraClient};
use anyhow::Context;
use std::process::ExitCode;
use std::rc::Rc;

/// Runs the tool with settings read through `lookup`.
///
/// Configuration errors return `FAILURE` before the database is touched. Once
/// the connection is open it is closed on every path, and any fatal error
/// also returns `FAILURE`.
pub fn execute<F>(args: &Cli, lookup: F) -> ExitCode
where
    F: Fn(&str) -> Option<String>,
{
    // 1️⃣ Configuration errors stop the run before any work
    tracing::info!("Validating configuration...");
    let cfg = match Config::from_lookup(lookup) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("* Configuration valid");

    // 2️⃣ One connection for the whole run, closed on every path below
    let db = match Database::open(&cfg.database_url) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Fatal error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = run_app(args, &cfg, &db);
    let closed = db.close();

    match (result, closed) {
        (Ok(()), Ok(())) => {
            tracing::info!("* All operations completed successfully");
            ExitCode::SUCCESS
        }
        (Err(e), _) => {
            tracing::error!("Fatal error: {e:#}");
            ExitCode::FAILURE
        }
        (Ok(()), Err(e)) => {
            tracing::error!("Fatal error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_app(args: &Cli, cfg: &Config, db: &Database) -> anyhow::Result<()> {
    match &cfg.schema_path {
        Some(schema) => init_db(db, schema).context("applying database schema")?,
        None => apply_schema(db, BUNDLED_SCHEMA).context("applying bundled schema")?,
    }

    let reporter = Rc::new(TracingReporter);
    let tables = Tables {
        condo: cfg.condo_table.clone(),
        landed: cfg.landed_table.clone(),
        rentals: RentalSink::from(cfg.rental_table.clone()),
    };

    if !args.stats_only {
        tracing::info!("Initializing API client...");
        let transport = HttpTransport::new(cfg.base_url.clone(), &cfg.access_key)
            .context("building HTTP client")?;
        let client = UraClient::new(transport, reporter.clone())
            .with_services(cfg.services.clone())
            .with_batch_pause(cfg.batch_pause);

        let summary = pipeline::run(
            &client,
            db,
            &tables,
            cfg.insert_batch_size,
            args.include_rentals,
            reporter.as_ref(),
        )
        .context("ingesting URA transactions")?;
        log_summary(&summary);
    }

    log_statistics(&statistics(db, &tables, reporter.as_ref()));
    Ok(())
}
