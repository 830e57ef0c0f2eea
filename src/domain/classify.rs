// src/domain/classify.rs

use crate::domain::TransactionRecord;

/// Substrings of an upper-cased property type that mark a landed home.
/// "Semi-Detached House" matches through "DETACHED".
pub const LANDED_TYPES: [&str; 3] = ["DETACHED", "TERRACE", "BUNGALOW"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Condo,
    Landed,
}

impl Category {
    pub fn of(property_type: &str) -> Self {
        let upper = property_type.to_uppercase();
        if LANDED_TYPES.iter().any(|t| upper.contains(t)) {
            Category::Landed
        } else {
            Category::Condo
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Classified {
    pub condo: Vec<TransactionRecord>,
    pub landed: Vec<TransactionRecord>,
}

impl Classified {
    pub fn total(&self) -> usize {
        self.condo.len() + self.landed.len()
    }
}

/// Routes every record to exactly one bucket, keeping input order within each.
pub fn classify(records: Vec<TransactionRecord>) -> Classified {
    let mut out = Classified::default();
    for record in records {
        match Category::of(&record.property_type) {
            Category::Condo => out.condo.push(record),
            Category::Landed => out.landed.push(record),
        }
    }
    out
}
