pub mod bulk;
pub mod connection;
pub mod stats;

pub use bulk::{insert_batch, TableRecord, DEFAULT_BATCH_SIZE};
pub use connection::{apply_schema, init_db, Database, BUNDLED_SCHEMA};
pub use stats::{latest_date, row_count, DEFAULT_DATE_COLUMN};
