use crate::db::connection::{init_db, Database};
use crate::domain::TransactionRecord;
use crate::report::{Event, Reporter};
use crate::scraper::{ScraperError, Sleeper, Transport};
use chrono::{TimeZone, Utc};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

/// Fresh in-memory database with the production schema applied.
pub fn test_db() -> Database {
    let db = Database::open_in_memory()
        .unwrap_or_else(|e| panic!("Database open failed: {e}"));
    let schema = Path::new(env!("CARGO_MANIFEST_DIR")).join("sql/schema.sql");

    init_db(&db, &schema).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

/// Replays scripted responses in order. Once the script runs out every call
/// answers with an empty `Result` array.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<String, ScraperError>>>,
    requests: RefCell<Vec<Vec<(String, String)>>>,
}

impl FakeTransport {
    pub fn push_ok(&self, body: &str) {
        self.responses.borrow_mut().push_back(Ok(body.to_string()));
    }

    pub fn push_err(&self, err: ScraperError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<Vec<(String, String)>> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, query: &[(&str, String)]) -> Result<String, ScraperError> {
        self.requests.borrow_mut().push(
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        );
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(r#"{"Result": []}"#.to_string()))
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    slept: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

/// One project, one condo sale and one semi-detached sale.
pub fn skyline_body() -> String {
    r#"{
        "Result": [{
            "project": "Skyline",
            "street": "Orchard Rd",
            "x": "123",
            "y": "456",
            "transaction": [
                {"area": "90", "contractDate": "20240115", "price": "1800000",
                 "propertyType": "Condominium"},
                {"area": "300", "contractDate": "20240203", "price": "5200000",
                 "propertyType": "Semi-Detached House"}
            ]
        }]
    }"#
    .to_string()
}

/// `n` condo sales with distinct prices.
pub fn sample_transactions(n: usize) -> Vec<TransactionRecord> {
    let scraped_at = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
    (0..n)
        .map(|i| TransactionRecord {
            project_name: "Skyline".into(),
            street: "Orchard Rd".into(),
            x_coordinate: "123".into(),
            y_coordinate: "456".into(),
            area: "90".into(),
            floor_range: "01-05".into(),
            no_of_units: "1".into(),
            contract_date: format!("2024-01-{:02}", i % 28 + 1),
            type_of_sale: "3".into(),
            price: (1_000_000 + i).to_string(),
            property_type: "Condominium".into(),
            district: "09".into(),
            type_of_area: "Strata".into(),
            tenure: "Freehold".into(),
            market_segment: "CCR".into(),
            batch: 1,
            scraped_at,
        })
        .collect()
}
