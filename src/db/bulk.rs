use crate::db::connection::Database;
use crate::errors::DbError;
use crate::report::{Event, Reporter};
use rusqlite::{Connection, ToSql};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// SQLite's default cap on bound parameters in one statement.
const MAX_SQL_VARIABLES: usize = 32766;

/// A row type with a fixed, ordered column list.
///
/// `values` must return exactly one value per entry in `COLUMNS`, in the same
/// order.
pub trait TableRecord {
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<&dyn ToSql>;
}

/// Table and column names come from configuration and are spliced into SQL,
/// so only plain identifiers are allowed.
pub fn validate_identifier(name: &str) -> Result<(), DbError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidIdentifier(name.to_string()))
    }
}

/// Inserts `records` into `table` in chunks of at most `batch_size`, skipping
/// rows that hit a uniqueness constraint.
///
/// Each chunk is its own transaction. A chunk that fails is rolled back and
/// reported, and the next chunk is still attempted. Returns the number of
/// rows actually written; skipped duplicates are not counted.
pub fn insert_batch<R: TableRecord>(
    db: &Database,
    table: &str,
    records: &[R],
    batch_size: usize,
    reporter: &dyn Reporter,
) -> Result<usize, DbError> {
    if records.is_empty() {
        reporter.report(Event::InsertSkipped {
            table: table.to_string(),
        });
        return Ok(0);
    }

    validate_identifier(table)?;
    for column in R::COLUMNS {
        validate_identifier(column)?;
    }

    let batch_size = batch_size.max(1);
    let chunks = records.len().div_ceil(batch_size);

    reporter.report(Event::InsertStarted {
        table: table.to_string(),
        records: records.len(),
        chunks,
    });

    let mut total = 0;
    for (i, chunk) in records.chunks(batch_size).enumerate() {
        let n = i + 1;
        match db.with_conn(|conn| insert_chunk(conn, table, chunk)) {
            Ok(inserted) => {
                total += inserted;
                reporter.report(Event::ChunkInserted {
                    table: table.to_string(),
                    chunk: n,
                    chunks,
                    inserted,
                });
            }
            Err(e) => reporter.report(Event::ChunkFailed {
                table: table.to_string(),
                chunk: n,
                chunks,
                error: e.to_string(),
            }),
        }
    }

    reporter.report(Event::InsertFinished {
        table: table.to_string(),
        inserted: total,
    });
    Ok(total)
}

/// One chunk, one transaction. Dropping the transaction on an error path
/// rolls it back.
fn insert_chunk<R: TableRecord>(
    conn: &mut Connection,
    table: &str,
    chunk: &[R],
) -> Result<usize, DbError> {
    let columns = R::COLUMNS;
    let rows_per_statement = (MAX_SQL_VARIABLES / columns.len().max(1)).max(1);

    let tx = conn.transaction()?;
    let mut inserted = 0;

    for rows in chunk.chunks(rows_per_statement) {
        let mut params: Vec<&dyn ToSql> = Vec::with_capacity(rows.len() * columns.len());
        for record in rows {
            let values = record.values();
            if values.len() != columns.len() {
                return Err(DbError::Arity {
                    expected: columns.len(),
                    found: values.len(),
                });
            }
            params.extend(values);
        }

        let sql = insert_sql(table, columns, rows.len());
        inserted += tx.execute(&sql, params.as_slice())?;
    }

    tx.commit()?;
    Ok(inserted)
}

fn insert_sql(table: &str, columns: &[&str], rows: usize) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    let row = format!("({placeholders})");
    let values = vec![row.as_str(); rows].join(", ");

    format!(
        "INSERT INTO {table} ({}) VALUES {values} ON CONFLICT DO NOTHING",
        columns.join(", ")
    )
}
