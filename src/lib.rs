//! Compare ways of turning an IP address string into a sticky-session bucket.
//!
//! A run generates random IPv4 and IPv6 address text, pushes every address
//! through each candidate in [`hashes`], reduces the result modulo the bucket
//! count and reports wall-clock time together with bucket occupancy.

use std::io::Write;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

pub mod config;
pub mod error;
pub mod generator;
pub mod hashes;
pub mod report;
pub mod scatter;

pub use config::Config;
pub use error::{Result, ScatterError};
pub use generator::AddressFamily;
pub use hashes::candidates;
pub use scatter::{BucketKey, Measurement, Scatter};

/// Trait for address-to-integer derivations compared by the benchmark.
pub trait IpHasher {
    /// Name used in the report.
    fn name(&self) -> &'static str;
    /// Derived value for `ip`, or `None` if the candidate cannot read it.
    ///
    /// Values are doubles so that candidates exceeding 2^53 lose precision
    /// the same way a dynamically typed balancer would.
    fn hash(&self, ip: &str) -> Option<f64>;
}

/// Run the whole benchmark described by `config`, writing the report to `out`.
///
/// All address sets are generated before anything is timed, and the int31
/// seed is drawn once after generation.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    config.validate()?;
    let buckets = config.buckets()?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut sets = Vec::with_capacity(config.families.len());
    for &family in &config.families {
        report::write_generating(out, family, config.count)?;
        info!(%family, count = config.count, "generating addresses");
        sets.push((family, generator::generate(family, config.count, &mut rng)));
    }
    writeln!(out)?;

    let int31_seed = config
        .int31_seed
        .unwrap_or_else(|| rng.gen_range(0..config::INT31_SEED_BOUND));
    info!(int31_seed, buckets = buckets.get(), "starting benchmark");
    let candidates = hashes::candidates(int31_seed);

    for (i, (family, ips)) in sets.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let measurements = scatter::run_family(&candidates, ips, buckets);
        report::write_family(out, *family, &measurements)?;
    }

    out.flush()?;
    Ok(())
}
