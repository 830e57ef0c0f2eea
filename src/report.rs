//! Progress and error events emitted by the pipeline.
//!
//! Components never log on their own; they hand an [`Event`] to whatever
//! [`Reporter`] they were built with. Production wires in [`TracingReporter`],
//! tests collect events in memory.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        include_rentals: bool,
    },
    RunFinished,
    BatchRequested {
        dataset: &'static str,
        batch: u8,
    },
    BatchFetched {
        dataset: &'static str,
        batch: u8,
        records: usize,
    },
    BatchEmpty {
        dataset: &'static str,
        batch: u8,
    },
    BatchFailed {
        dataset: &'static str,
        batch: u8,
        error: String,
    },
    RetryScheduled {
        attempt: u32,
        max_attempts: u32,
        delay: Duration,
        error: String,
    },
    Classified {
        total: usize,
        condo: usize,
        landed: usize,
    },
    InsertStarted {
        table: String,
        records: usize,
        chunks: usize,
    },
    InsertSkipped {
        table: String,
    },
    ChunkInserted {
        table: String,
        chunk: usize,
        chunks: usize,
        inserted: usize,
    },
    ChunkFailed {
        table: String,
        chunk: usize,
        chunks: usize,
        error: String,
    },
    InsertFinished {
        table: String,
        inserted: usize,
    },
    QueryFailed {
        table: String,
        query: &'static str,
        error: String,
    },
    RentalsDiscarded {
        records: usize,
    },
}

pub trait Reporter {
    fn report(&self, event: Event);
}

/// Forwards every event to `tracing` at a level matching its severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: Event) {
        match event {
            Event::RunStarted { include_rentals } => {
                tracing::info!(include_rentals, "Starting URA property transaction fetch");
            }
            Event::RunFinished => {
                tracing::info!("Fetch completed successfully");
            }
            Event::BatchRequested { dataset, batch } => {
                tracing::info!(dataset, batch, "Fetching batch");
            }
            Event::BatchFetched {
                dataset,
                batch,
                records,
            } => {
                tracing::info!(dataset, batch, records, "Fetched batch");
            }
            Event::BatchEmpty { dataset, batch } => {
                tracing::warn!(dataset, batch, "No data returned for batch");
            }
            Event::BatchFailed {
                dataset,
                batch,
                error,
            } => {
                tracing::error!(dataset, batch, %error, "Error fetching batch");
            }
            Event::RetryScheduled {
                attempt,
                max_attempts,
                delay,
                error,
            } => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "Request failed, retrying"
                );
            }
            Event::Classified {
                total,
                condo,
                landed,
            } => {
                tracing::info!(total, condo, landed, "Classified transactions");
            }
            Event::InsertStarted {
                table,
                records,
                chunks,
            } => {
                tracing::info!(%table, records, chunks, "Inserting records");
            }
            Event::InsertSkipped { table } => {
                tracing::warn!(%table, "No records to insert");
            }
            Event::ChunkInserted {
                table,
                chunk,
                chunks,
                inserted,
            } => {
                tracing::info!(%table, "Batch {chunk}/{chunks}: inserted {inserted} records");
            }
            Event::ChunkFailed {
                table,
                chunk,
                chunks,
                error,
            } => {
                tracing::error!(%table, %error, "Error inserting batch {chunk}/{chunks}");
            }
            Event::InsertFinished { table, inserted } => {
                tracing::info!(%table, inserted, "Insert finished");
            }
            Event::QueryFailed { table, query, error } => {
                tracing::warn!(%table, query, %error, "Statistics query failed");
            }
            Event::RentalsDiscarded { records } => {
                tracing::info!(
                    records,
                    "Rental storage not configured (set RENTAL_TABLE); rentals discarded"
                );
            }
        }
    }
}
