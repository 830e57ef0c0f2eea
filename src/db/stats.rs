use crate::db::bulk::validate_identifier;
use crate::db::connection::Database;
use crate::report::{Event, Reporter};
use rusqlite::OptionalExtension;

pub const DEFAULT_DATE_COLUMN: &str = "contract_date";

/// Largest value of `date_column`, or `None` for an empty table.
///
/// Diagnostics only: any failure is reported and treated as `None`.
pub fn latest_date(
    db: &Database,
    table: &str,
    date_column: &str,
    reporter: &dyn Reporter,
) -> Option<String> {
    let result = validate_identifier(table)
        .and_then(|_| validate_identifier(date_column))
        .and_then(|_| {
            db.with_conn(|conn| {
                let latest: Option<String> = conn
                    .query_row(
                        &format!("SELECT MAX({date_column}) FROM {table}"),
                        [],
                        |row| row.get(0),
                    )
                    .optional()?
                    .flatten();
                Ok(latest)
            })
        });

    result.unwrap_or_else(|e| {
        reporter.report(Event::QueryFailed {
            table: table.to_string(),
            query: "latest_date",
            error: e.to_string(),
        });
        None
    })
}

/// Total rows in `table`; `0` if the query fails.
pub fn row_count(db: &Database, table: &str, reporter: &dyn Reporter) -> u64 {
    let result = validate_identifier(table).and_then(|_| {
        db.with_conn(|conn| {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(count.max(0) as u64)
        })
    });

    result.unwrap_or_else(|e| {
        reporter.report(Event::QueryFailed {
            table: table.to_string(),
            query: "row_count",
            error: e.to_string(),
        });
        0
    })
}
