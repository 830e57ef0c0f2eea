use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One GET against the data service, returning the raw body on a 2xx.
pub trait Transport {
    fn get(&self, query: &[(&str, String)]) -> Result<String, ScraperError>;
}

pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url, access_key: &str) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(access_key)
            .map_err(|e| ScraperError::Config(format!("invalid access key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("AccessKey", key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScraperError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }
}

impl Transport for HttpTransport {
    fn get(&self, query: &[(&str, String)]) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(self.base_url.clone())
            .query(query)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(ScraperError::Status { status, body: text });
        }

        Ok(text)
    }
}
