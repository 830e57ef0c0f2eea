//! Fetches private residential transactions from the URA data service,
//! splits them into condo and landed sales, and loads them into SQLite with
//! duplicate-safe batch inserts.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod scraper;

#[cfg(test)]
mod tests;
