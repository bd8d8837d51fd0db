//! Bucket occupancy and the timed benchmark loop.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::IpHasher;

/// Where one address lands. Integer buckets sort before `NotANumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Index(u64),
    /// The candidate could not derive a number from the address.
    NotANumber,
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Index(i) => write!(f, "{i}"),
            BucketKey::NotANumber => f.write_str("NaN"),
        }
    }
}

/// Reduce a derived value into `0..buckets` with floating-point remainder,
/// truncating to the bucket index. Non-finite or negative values land in
/// `NotANumber`.
pub fn bucket_of(hash: Option<f64>, buckets: NonZeroU64) -> BucketKey {
    match hash {
        Some(h) if h.is_finite() && h >= 0.0 => {
            // The remainder is below `buckets`, so it fits in u64.
            BucketKey::Index((h % buckets.get() as f64) as u64)
        }
        _ => BucketKey::NotANumber,
    }
}

/// Per-bucket hit counts, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scatter {
    counts: BTreeMap<BucketKey, u64>,
}

impl Scatter {
    pub fn record(&mut self, key: BucketKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: BucketKey) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of occupied buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, u64)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }
}

/// One candidate's result over one address set.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub name: &'static str,
    pub elapsed: Duration,
    pub scatter: Scatter,
}

/// Hash every address with `hasher` and count bucket hits. The elapsed time
/// covers hashing, reduction and counting.
pub fn measure(hasher: &dyn IpHasher, ips: &[String], buckets: NonZeroU64) -> Measurement {
    let start = Instant::now();
    let mut scatter = Scatter::default();
    for ip in ips {
        scatter.record(bucket_of(hasher.hash(ip), buckets));
    }
    let elapsed = start.elapsed();

    debug!(
        candidate = hasher.name(),
        elapsed_ms = elapsed.as_millis() as u64,
        occupied = scatter.len(),
        nan = scatter.get(BucketKey::NotANumber),
        "measured candidate"
    );

    Measurement {
        name: hasher.name(),
        elapsed,
        scatter,
    }
}

/// [`measure`] each candidate in order over the same addresses.
pub fn run_family(
    candidates: &[Box<dyn IpHasher>],
    ips: &[String],
    buckets: NonZeroU64,
) -> Vec<Measurement> {
    candidates
        .iter()
        .map(|c| measure(c.as_ref(), ips, buckets))
        .collect()
}
