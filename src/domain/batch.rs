// src/domain/batch.rs

use std::fmt;

/// One of the four quarterly windows the URA service partitions data into.
/// `1` is the latest quarter, `4` is three quarters prior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Batch(u8);

impl Batch {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 4;

    pub fn new(n: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST).contains(&n).then_some(Self(n))
    }

    /// All batches, latest first.
    pub fn all() -> impl Iterator<Item = Batch> {
        (Self::FIRST..=Self::LAST).filter_map(Batch::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
