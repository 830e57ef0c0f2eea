use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

use crate::errors::DbError;

/// `sql/schema.sql`, compiled in so a fresh database works without the file.
pub const BUNDLED_SCHEMA: &str = include_str!("../../sql/schema.sql");

/// The process-wide SQLite connection. Opened once at startup and released
/// with [`Database::close`].
pub struct Database {
    conn: RefCell<Connection>,
}

impl Database {
    /// Opens the database named by a connection string. Accepts a bare path,
    /// `sqlite://path`, `sqlite:path` or `:memory:`.
    pub fn open(url: &str) -> Result<Self, DbError> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        let conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| DbError::Open(format!("{path}: {e}")))?;

        Ok(Self {
            conn: RefCell::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::open(":memory:")
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Connection) -> Result<T, DbError>,
    {
        let mut conn = self.conn.borrow_mut();
        f(&mut *conn)
    }

    pub fn close(self) -> Result<(), DbError> {
        self.conn
            .into_inner()
            .close()
            .map_err(|(_, e)| DbError::Query(e))?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &Path) -> Result<(), DbError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| DbError::Schema(format!("{}: {e}", schema_path.display())))?;

    apply_schema(db, &schema_sql)?;
    tracing::info!(schema = %schema_path.display(), "Database schema applied");
    Ok(())
}

pub fn apply_schema(db: &Database, schema_sql: &str) -> Result<(), DbError> {
    db.with_conn(|conn| {
        conn.execute_batch(schema_sql)
            .map_err(|e| DbError::Schema(e.to_string()))
    })
}
