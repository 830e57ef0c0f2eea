pub mod batch;
pub mod classify;
pub mod transaction;

pub use batch::Batch;
pub use classify::{classify, Category, Classified};
pub use transaction::{RentalRecord, TransactionRecord};
