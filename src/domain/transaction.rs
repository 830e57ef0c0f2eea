// src/domain/transaction.rs

use crate::db::TableRecord;
use crate::domain::Batch;
use crate::scraper::models::{Project, Rental, Transaction};
use chrono::{DateTime, Utc};
use rusqlite::ToSql;

/// One unit sale, flattened out of its enclosing project.
///
/// Every text field is kept exactly as the service sent it (missing values are
/// empty strings), so nothing here is guaranteed to parse as a number or date.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    // Project identity
    pub project_name: String,
    pub street: String,
    pub x_coordinate: String,
    pub y_coordinate: String,

    // Sale
    pub area: String,
    pub floor_range: String,
    pub no_of_units: String,
    pub contract_date: String,
    pub type_of_sale: String,
    pub price: String,
    pub property_type: String,
    pub district: String,
    pub type_of_area: String,
    pub tenure: String,
    pub market_segment: String,

    // Provenance
    pub batch: u8,
    pub scraped_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn from_raw(
        project: &Project,
        txn: Transaction,
        batch: Batch,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_name: project.project.clone(),
            street: project.street.clone(),
            x_coordinate: project.x.clone(),
            y_coordinate: project.y.clone(),
            area: txn.area,
            floor_range: txn.floor_range,
            no_of_units: txn.no_of_units,
            contract_date: txn.contract_date,
            type_of_sale: txn.type_of_sale,
            price: txn.price,
            property_type: txn.property_type,
            district: txn.district,
            type_of_area: txn.type_of_area,
            tenure: txn.tenure,
            market_segment: txn.market_segment,
            batch: batch.get(),
            scraped_at,
        }
    }

    /// Joins every transaction with its project, preserving response order.
    pub fn flatten(projects: Vec<Project>, batch: Batch, scraped_at: DateTime<Utc>) -> Vec<Self> {
        let mut records = Vec::new();
        for mut project in projects {
            let txns = std::mem::take(&mut project.transaction);
            records.extend(
                txns.into_iter()
                    .map(|txn| Self::from_raw(&project, txn, batch, scraped_at)),
            );
        }
        records
    }
}

impl TableRecord for TransactionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "project_name",
        "street",
        "x_coordinate",
        "y_coordinate",
        "area",
        "floor_range",
        "no_of_units",
        "contract_date",
        "type_of_sale",
        "price",
        "property_type",
        "district",
        "type_of_area",
        "tenure",
        "market_segment",
        "batch",
        "scraped_at",
    ];

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.project_name as &dyn ToSql,
            &self.street,
            &self.x_coordinate,
            &self.y_coordinate,
            &self.area,
            &self.floor_range,
            &self.no_of_units,
            &self.contract_date,
            &self.type_of_sale,
            &self.price,
            &self.property_type,
            &self.district,
            &self.type_of_area,
            &self.tenure,
            &self.market_segment,
            &self.batch,
            &self.scraped_at,
        ]
    }
}

/// One lease, flattened out of its enclosing project.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRecord {
    pub project_name: String,
    pub street: String,
    pub x_coordinate: String,
    pub y_coordinate: String,
    pub area_sqm: String,
    pub rent: String,
    pub lease_date: String,
    pub property_type: String,
    pub district: String,
    pub batch: u8,
    pub scraped_at: DateTime<Utc>,
}

impl RentalRecord {
    pub fn from_raw(
        project: &Project,
        rental: Rental,
        batch: Batch,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_name: project.project.clone(),
            street: project.street.clone(),
            x_coordinate: project.x.clone(),
            y_coordinate: project.y.clone(),
            area_sqm: rental.area_sqm,
            rent: rental.rent,
            lease_date: rental.lease_date,
            property_type: rental.property_type,
            district: rental.district,
            batch: batch.get(),
            scraped_at,
        }
    }

    pub fn flatten(projects: Vec<Project>, batch: Batch, scraped_at: DateTime<Utc>) -> Vec<Self> {
        let mut records = Vec::new();
        for mut project in projects {
            let rentals = std::mem::take(&mut project.rental);
            records.extend(
                rentals
                    .into_iter()
                    .map(|rental| Self::from_raw(&project, rental, batch, scraped_at)),
            );
        }
        records
    }
}

impl TableRecord for RentalRecord {
    const COLUMNS: &'static [&'static str] = &[
        "project_name",
        "street",
        "x_coordinate",
        "y_coordinate",
        "area_sqm",
        "rent",
        "lease_date",
        "property_type",
        "district",
        "batch",
        "scraped_at",
    ];

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.project_name as &dyn ToSql,
            &self.street,
            &self.x_coordinate,
            &self.y_coordinate,
            &self.area_sqm,
            &self.rent,
            &self.lease_date,
            &self.property_type,
            &self.district,
            &self.batch,
            &self.scraped_at,
        ]
    }
}
