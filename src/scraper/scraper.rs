// scraper.rs
use crate::domain::{classify, Batch, Classified, RentalRecord, TransactionRecord};
use crate::report::{Event, Reporter};
use crate::scraper::models::{Project, UraResponse};
use crate::scraper::retry::{with_retry, RetryPolicy, Sleeper, ThreadSleeper};
use crate::scraper::transport::Transport;
use crate::scraper::ScraperError;
use chrono::Utc;
use std::rc::Rc;
use std::time::Duration;

pub const TRANSACTIONS: &str = "transactions";
pub const RENTALS: &str = "rentals";

/// Service identifiers passed as the `service` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Services {
    pub transaction: String,
    pub rental: String,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            transaction: "PMI_Resi_Transaction".into(),
            rental: "PMI_Resi_Rental".into(),
        }
    }
}

pub struct UraClient<T> {
    transport: T,
    services: Services,
    retry: RetryPolicy,
    batch_pause: Duration,
    sleeper: Rc<dyn Sleeper>,
    reporter: Rc<dyn Reporter>,
}

impl<T: Transport> UraClient<T> {
    pub fn new(transport: T, reporter: Rc<dyn Reporter>) -> Self {
        Self {
            transport,
            services: Services::default(),
            retry: RetryPolicy::default(),
            batch_pause: Duration::from_secs(1),
            sleeper: Rc::new(ThreadSleeper),
            reporter,
        }
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Rc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Waits out the configured gap between two requests.
    pub fn pause(&self) {
        self.sleeper.sleep(self.batch_pause);
    }

    /// Fetches and flattens one batch of sale transactions. Errors surface
    /// once the retry policy is exhausted.
    pub fn fetch_transaction_batch(
        &self,
        batch: Batch,
    ) -> Result<Vec<TransactionRecord>, ScraperError> {
        let Some(projects) = self.fetch_projects(&self.services.transaction, TRANSACTIONS, batch)?
        else {
            return Ok(Vec::new());
        };

        let records = TransactionRecord::flatten(projects, batch, Utc::now());
        self.reporter.report(Event::BatchFetched {
            dataset: TRANSACTIONS,
            batch: batch.get(),
            records: records.len(),
        });
        Ok(records)
    }

    /// Fetches batches 1 through 4 in order and classifies the union.
    ///
    /// A batch that still fails after retries is reported and contributes no
    /// records; the remaining batches are still fetched.
    pub fn fetch_all_transactions(&self) -> Classified {
        let mut all = Vec::new();

        for (i, batch) in Batch::all().enumerate() {
            if i > 0 {
                self.pause();
            }
            match self.fetch_transaction_batch(batch) {
                Ok(records) => all.extend(records),
                Err(e) => self.reporter.report(Event::BatchFailed {
                    dataset: TRANSACTIONS,
                    batch: batch.get(),
                    error: e.to_string(),
                }),
            }
        }

        let classified = classify(all);
        self.reporter.report(Event::Classified {
            total: classified.total(),
            condo: classified.condo.len(),
            landed: classified.landed.len(),
        });
        classified
    }

    pub fn fetch_rental_batch(&self, batch: Batch) -> Result<Vec<RentalRecord>, ScraperError> {
        let Some(projects) = self.fetch_projects(&self.services.rental, RENTALS, batch)? else {
            return Ok(Vec::new());
        };

        let records = RentalRecord::flatten(projects, batch, Utc::now());
        self.reporter.report(Event::BatchFetched {
            dataset: RENTALS,
            batch: batch.get(),
            records: records.len(),
        });
        Ok(records)
    }

    /// `None` when the body carries no `Result` array.
    fn fetch_projects(
        &self,
        service: &str,
        dataset: &'static str,
        batch: Batch,
    ) -> Result<Option<Vec<Project>>, ScraperError> {
        self.reporter.report(Event::BatchRequested {
            dataset,
            batch: batch.get(),
        });

        let query = [("service", service.to_string()), ("batch", batch.to_string())];
        let body = with_retry(&self.retry, self.sleeper.as_ref(), self.reporter.as_ref(), || {
            self.transport.get(&query)
        })?;

        let resp: UraResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::JsonParse(e.to_string()))?;

        if resp.result.is_none() {
            self.reporter.report(Event::BatchEmpty {
                dataset,
                batch: batch.get(),
            });
        }
        Ok(resp.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{skyline_body, FakeTransport, RecordingReporter, RecordingSleeper};

    fn client(
        transport: FakeTransport,
    ) -> (UraClient<FakeTransport>, Rc<RecordingReporter>, Rc<RecordingSleeper>) {
        let reporter = Rc::new(RecordingReporter::default());
        let sleeper = Rc::new(RecordingSleeper::default());
        let client = UraClient::new(transport, reporter.clone()).with_sleeper(sleeper.clone());
        (client, reporter, sleeper)
    }

    fn batch(n: u8) -> Batch {
        Batch::new(n).unwrap()
    }

    #[test]
    fn sends_service_and_batch_parameters() {
        let transport = FakeTransport::default();
        transport.push_ok(r#"{"Result": []}"#);
        let (client, _, _) = client(transport);

        client.fetch_transaction_batch(batch(3)).unwrap();

        let requests = client.transport.requests();
        assert_eq!(
            requests,
            vec![vec![
                ("service".to_string(), "PMI_Resi_Transaction".to_string()),
                ("batch".to_string(), "3".to_string()),
            ]]
        );
    }

    #[test]
    fn skyline_transaction_is_flattened() {
        let transport = FakeTransport::default();
        transport.push_ok(&skyline_body());
        let (client, _, _) = client(transport);

        let records = client.fetch_transaction_batch(batch(1)).unwrap();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.project_name, "Skyline");
        assert_eq!(first.street, "Orchard Rd");
        assert_eq!(first.x_coordinate, "123");
        assert_eq!(first.y_coordinate, "456");
        assert_eq!(first.area, "90");
        assert_eq!(first.contract_date, "20240115");
        assert_eq!(first.price, "1800000");
        assert_eq!(first.floor_range, "");
        assert_eq!(first.batch, 1);
    }

    #[test]
    fn missing_result_is_an_empty_batch() {
        let transport = FakeTransport::default();
        transport.push_ok(r#"{"Status": "Success"}"#);
        let (client, reporter, _) = client(transport);

        let records = client.fetch_transaction_batch(batch(2)).unwrap();

        assert!(records.is_empty());
        assert!(reporter.events().contains(&Event::BatchEmpty {
            dataset: TRANSACTIONS,
            batch: 2,
        }));
    }

    #[test]
    fn single_batch_propagates_exhausted_retries() {
        let transport = FakeTransport::default();
        for _ in 0..3 {
            transport.push_err(ScraperError::Timeout("timed out".into()));
        }
        let (client, _, sleeper) = client(transport);

        let err = client.fetch_transaction_batch(batch(1)).unwrap_err();

        assert!(matches!(err, ScraperError::Timeout(_)));
        assert_eq!(client.transport.requests().len(), 3);
        assert_eq!(
            sleeper.slept(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
    }

    #[test]
    fn malformed_json_fails_without_retry() {
        let transport = FakeTransport::default();
        transport.push_ok("<html>maintenance</html>");
        let (client, _, _) = client(transport);

        let err = client.fetch_transaction_batch(batch(1)).unwrap_err();

        assert!(matches!(err, ScraperError::JsonParse(_)));
        assert_eq!(client.transport.requests().len(), 1);
    }

    #[test]
    fn failed_batch_counts_as_empty_and_run_continues() {
        let transport = FakeTransport::default();
        for _ in 0..3 {
            transport.push_err(ScraperError::Timeout("timed out".into()));
        }
        transport.push_ok(&skyline_body());
        transport.push_ok(r#"{"Result": []}"#);
        transport.push_ok(r#"{"Result": []}"#);
        let (client, reporter, sleeper) = client(transport);

        let classified = client.fetch_all_transactions();

        assert_eq!(client.transport.requests().len(), 6);
        assert_eq!(classified.condo.len(), 1);
        assert_eq!(classified.landed.len(), 1);
        assert!(classified.condo.iter().all(|r| r.batch == 2));
        assert!(reporter
            .events()
            .iter()
            .any(|e| matches!(e, Event::BatchFailed { batch: 1, .. })));

        // two backoffs for batch 1, then one pause between each pair of batches
        assert_eq!(
            sleeper.slept(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(1),
                Duration::from_secs(1),
                Duration::from_secs(1),
            ]
        );
    }

    #[test]
    fn rental_batch_uses_rental_service() {
        let transport = FakeTransport::default();
        transport.push_ok(
            r#"{"Result": [{"project": "Skyline", "street": "Orchard Rd",
                "rental": [{"areaSqm": "90-100", "rent": "4200", "leaseDate": "0124",
                            "propertyType": "Non-landed Properties", "district": "09"}]}]}"#,
        );
        let (client, _, _) = client(transport);

        let rentals = client.fetch_rental_batch(batch(4)).unwrap();

        assert_eq!(rentals.len(), 1);
        assert_eq!(rentals[0].rent, "4200");
        assert_eq!(rentals[0].batch, 4);
        assert_eq!(
            client.transport.requests()[0][0],
            ("service".to_string(), "PMI_Resi_Rental".to_string())
        );
    }
}
