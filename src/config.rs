// config.rs
use crate::db::bulk::validate_identifier;
use crate::db::DEFAULT_BATCH_SIZE;
use crate::scraper::Services;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Settings for one run, read from the environment (and `.env`).
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub access_key: String,
    pub base_url: Url,

    pub condo_table: String,
    pub landed_table: String,
    /// Unset means rentals are fetched and discarded.
    pub rental_table: Option<String>,
    /// Unset means the bundled `sql/schema.sql` is applied.
    pub schema_path: Option<PathBuf>,

    pub insert_batch_size: usize,
    pub batch_pause: Duration,
    pub services: Services,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("access_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("condo_table", &self.condo_table)
            .field("landed_table", &self.landed_table)
            .field("rental_table", &self.rental_table)
            .field("schema_path", &self.schema_path)
            .field("insert_batch_size", &self.insert_batch_size)
            .field("batch_pause", &self.batch_pause)
            .field("services", &self.services)
            .finish()
    }
}

impl Config {
    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL");
        let access_key = get("URA_ACCESS_KEY");
        let base_url = get("URA_BASE_URL");

        let missing: Vec<&'static str> = [
            ("DATABASE_URL", database_url.is_none()),
            ("URA_ACCESS_KEY", access_key.is_none()),
            ("URA_BASE_URL", base_url.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(database_url), Some(access_key), Some(base_url)) =
            (database_url, access_key, base_url)
        else {
            return Err(ConfigError::Missing(missing));
        };

        let base_url = Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            var: "URA_BASE_URL",
            reason: e.to_string(),
        })?;

        let condo_table = table(get("CONDO_TABLE"), "CONDO_TABLE", "condo_transactions")?;
        let landed_table = table(get("LANDED_TABLE"), "LANDED_TABLE", "landed_transactions")?;
        let rental_table = get("RENTAL_TABLE")
            .map(|name| table(Some(name), "RENTAL_TABLE", ""))
            .transpose()?;

        let insert_batch_size = match get("INSERT_BATCH_SIZE") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "INSERT_BATCH_SIZE",
                        reason: format!("expected a positive integer, got {raw:?}"),
                    })
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let batch_pause = match get("BATCH_PAUSE_SECS") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| ConfigError::Invalid {
                    var: "BATCH_PAUSE_SECS",
                    reason: format!("expected a non-negative number of seconds, got {raw:?}"),
                })?,
            None => Duration::from_secs(1),
        };

        let defaults = Services::default();
        let services = Services {
            transaction: get("URA_TRANSACTION_SERVICE").unwrap_or(defaults.transaction),
            rental: get("URA_RENTAL_SERVICE").unwrap_or(defaults.rental),
        };

        Ok(Self {
            database_url,
            access_key,
            base_url,
            condo_table,
            landed_table,
            rental_table,
            schema_path: get("SCHEMA_PATH").map(PathBuf::from),
            insert_batch_size,
            batch_pause,
            services,
        })
    }
}

fn table(value: Option<String>, var: &'static str, default: &str) -> Result<String, ConfigError> {
    let name = value.unwrap_or_else(|| default.to_string());
    validate_identifier(&name).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;
    Ok(name)
}
