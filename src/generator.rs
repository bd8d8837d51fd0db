//! Random address text for the benchmark input.

use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn label(self) -> &'static str {
        match self {
            AddressFamily::V4 => "IPv4",
            AddressFamily::V6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dotted quad with each octet drawn uniformly from `0..=255`.
pub fn random_ipv4<R: Rng + ?Sized>(rng: &mut R) -> String {
    let [a, b, c, d]: [u8; 4] = rng.gen();
    format!("{a}.{b}.{c}.{d}")
}

/// Eight lowercase hextets without leading zeros or `::` compression.
pub fn random_ipv6<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hextets: [u16; 8] = rng.gen();
    hextets
        .iter()
        .map(|h| format!("{h:x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// `count` addresses of `family`. Duplicates are possible.
pub fn generate<R: Rng + ?Sized>(family: AddressFamily, count: usize, rng: &mut R) -> Vec<String> {
    let next: fn(&mut R) -> String = match family {
        AddressFamily::V4 => random_ipv4,
        AddressFamily::V6 => random_ipv6,
    };
    (0..count).map(|_| next(rng)).collect()
}
