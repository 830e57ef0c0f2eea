//! Sequences client → classifier → store for one run.

use crate::db::{insert_batch, latest_date, row_count, Database, DEFAULT_DATE_COLUMN};
use crate::domain::{Batch, RentalRecord};
use crate::errors::DbError;
use crate::report::{Event, Reporter};
use crate::scraper::{Transport, UraClient, RENTALS};

/// Where fetched rentals go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalSink {
    /// Fetched, counted, then dropped.
    Discard,
    /// Inserted into a table the operator created.
    Table(String),
}

impl From<Option<String>> for RentalSink {
    fn from(table: Option<String>) -> Self {
        table.map_or(RentalSink::Discard, RentalSink::Table)
    }
}

#[derive(Debug, Clone)]
pub struct Tables {
    pub condo: String,
    pub landed: String,
    pub rentals: RentalSink,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub condo_fetched: usize,
    pub landed_fetched: usize,
    pub condo_inserted: usize,
    pub landed_inserted: usize,
    pub rentals_fetched: usize,
    pub rentals_stored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    pub label: &'static str,
    pub table: String,
    pub rows: u64,
    pub latest: Option<String>,
}

/// Fetches every transaction batch, stores each category, and optionally
/// fetches rentals.
///
/// Per-batch fetch failures and per-chunk insert failures are absorbed below
/// this level. Only storage errors that make a whole table unusable (such as
/// an invalid table name) come back as `Err`.
pub fn run<T: Transport>(
    client: &UraClient<T>,
    db: &Database,
    tables: &Tables,
    batch_size: usize,
    include_rentals: bool,
    reporter: &dyn Reporter,
) -> Result<RunSummary, DbError> {
    reporter.report(Event::RunStarted { include_rentals });

    let classified = client.fetch_all_transactions();
    let mut summary = RunSummary {
        condo_fetched: classified.condo.len(),
        landed_fetched: classified.landed.len(),
        ..RunSummary::default()
    };

    summary.condo_inserted =
        insert_batch(db, &tables.condo, &classified.condo, batch_size, reporter)?;
    summary.landed_inserted =
        insert_batch(db, &tables.landed, &classified.landed, batch_size, reporter)?;

    if include_rentals {
        client.pause();
        let rentals = fetch_all_rentals(client, reporter);
        summary.rentals_fetched = rentals.len();
        summary.rentals_stored = match &tables.rentals {
            RentalSink::Discard => {
                reporter.report(Event::RentalsDiscarded {
                    records: rentals.len(),
                });
                0
            }
            RentalSink::Table(table) => insert_batch(db, table, &rentals, batch_size, reporter)?,
        };
    }

    reporter.report(Event::RunFinished);
    Ok(summary)
}

/// Rental batches 1 through 4, paced like the transaction batches; a failed
/// batch contributes nothing.
pub fn fetch_all_rentals<T: Transport>(
    client: &UraClient<T>,
    reporter: &dyn Reporter,
) -> Vec<RentalRecord> {
    let mut all = Vec::new();
    for (i, batch) in Batch::all().enumerate() {
        if i > 0 {
            client.pause();
        }
        match client.fetch_rental_batch(batch) {
            Ok(records) => all.extend(records),
            Err(e) => reporter.report(Event::BatchFailed {
                dataset: RENTALS,
                batch: batch.get(),
                error: e.to_string(),
            }),
        }
    }
    all
}

/// Row counts and latest contract dates, best effort.
pub fn statistics(db: &Database, tables: &Tables, reporter: &dyn Reporter) -> Vec<TableStats> {
    [("Condo", &tables.condo), ("Landed", &tables.landed)]
        .into_iter()
        .map(|(label, table)| TableStats {
            label,
            table: table.clone(),
            rows: row_count(db, table, reporter),
            latest: latest_date(db, table, DEFAULT_DATE_COLUMN, reporter),
        })
        .collect()
}

pub fn log_statistics(stats: &[TableStats]) {
    tracing::info!("Database statistics");
    for s in stats {
        tracing::info!(
            table = %s.table,
            total = s.rows,
            latest = s.latest.as_deref().unwrap_or("N/A"),
            "{} transactions",
            s.label
        );
    }
}

pub fn log_summary(summary: &RunSummary) {
    tracing::info!(
        fetched = summary.condo_fetched,
        inserted = summary.condo_inserted,
        "Stored condo transactions"
    );
    tracing::info!(
        fetched = summary.landed_fetched,
        inserted = summary.landed_inserted,
        "Stored landed transactions"
    );
    if summary.rentals_fetched > 0 {
        tracing::info!(
            fetched = summary.rentals_fetched,
            stored = summary.rentals_stored,
            "Rental transactions"
        );
    }
}
