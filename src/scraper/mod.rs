pub mod models;
pub mod retry;
mod scraper;
mod scraper_error;
pub mod transport;

pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use scraper::{Services, UraClient, RENTALS, TRANSACTIONS};
pub use scraper_error::ScraperError;
pub use transport::{HttpTransport, Transport};
