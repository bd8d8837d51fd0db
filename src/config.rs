//! Run configuration.

use std::num::NonZeroU64;

use crate::error::{Result, ScatterError};
use crate::generator::AddressFamily;

pub const DEFAULT_COUNT: usize = 1_000_000;

/// Upper bound (exclusive) for a drawn int31 seed.
pub const INT31_SEED_BOUND: u32 = 1_000_000_000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of buckets addresses are reduced into.
    pub bucket_count: u64,
    /// Addresses generated per family.
    pub count: usize,
    /// Families to benchmark, in order.
    pub families: Vec<AddressFamily>,
    /// Seed for address generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Seed for int31; `None` draws one from the run RNG.
    pub int31_seed: Option<u32>,
}

impl Config {
    pub fn new(bucket_count: u64) -> Self {
        Self {
            bucket_count,
            count: DEFAULT_COUNT,
            families: vec![AddressFamily::V4, AddressFamily::V6],
            seed: None,
            int31_seed: None,
        }
    }

    pub fn buckets(&self) -> Result<NonZeroU64> {
        NonZeroU64::new(self.bucket_count)
            .ok_or(ScatterError::InvalidBucketCount(self.bucket_count))
    }

    pub fn validate(&self) -> Result<()> {
        self.buckets()?;
        if self.count == 0 {
            return Err(ScatterError::EmptyInput("address count is zero".into()));
        }
        if self.families.is_empty() {
            return Err(ScatterError::EmptyInput("no address family selected".into()));
        }
        Ok(())
    }
}
