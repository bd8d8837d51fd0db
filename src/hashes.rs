//! Candidate IP-to-integer derivations.
//!
//! Every function takes the address as text, the way a load balancer sees it
//! in a header or socket peer string. `None` means the candidate could not
//! derive a number from the input. Derived values are `f64`: the naive
//! candidates lose precision on long digit runs, and that loss is part of
//! what the benchmark shows.

use std::str::FromStr;

use crate::IpHasher;

const MOD31: i64 = 1 << 31;

/// Leading decimal prefix of `segment`, allowing leading whitespace and a sign.
/// `None` when there are no digits at all. Long prefixes round to the nearest
/// `f64`, or to infinity past its range.
fn leading_decimal(segment: &str) -> Option<f64> {
    let s = segment.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: f64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// A whole segment read as one decimal number. Surrounding whitespace is
/// ignored and an empty segment reads as zero.
fn whole_decimal<T: FromStr + Default>(segment: &str) -> Option<T> {
    let s = segment.trim();
    if s.is_empty() {
        return Some(T::default());
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// One accumulator round. A segment without digits, or one that overflows
/// `f64`, zeroes the state.
fn int31_round(r: i64, segment: Option<f64>) -> i64 {
    let Some(n) = segment else {
        return 0;
    };

    // The sum rounds like any double; the remainder is an exact integer.
    let sum = (r as f64 + n) % MOD31 as f64;
    if !sum.is_finite() {
        return 0;
    }

    // r stays within (-2^31, 2^31) after each `%`, so `as i32` is exact there.
    let mut r = sum as i64;
    r += i64::from((r as i32) << 10);
    r %= MOD31;
    let x = r as i32;
    i64::from(x ^ (x >> 6))
}

/// Seeded shift-add-xor accumulator over the `.`-separated segments of `ip`.
///
/// Arithmetic follows 32-bit signed semantics: shifts wrap in `i32`, `%` keeps
/// the sign of the dividend, and the final value is reinterpreted as `u32`.
/// Each segment is added to the state as a double, so segments beyond 2^53
/// contribute their rounded value. The result is defined for any input.
pub fn int31(ip: &str, seed: u32) -> u32 {
    let acc = ip
        .split('.')
        .map(leading_decimal)
        .fold(i64::from(seed), int31_round);

    let mut h = acc;
    h += i64::from((h as i32) << 3);
    h %= MOD31;
    let x = h as i32;
    h = i64::from(x ^ (x >> 11));
    h += i64::from((h as i32) << 15);
    h %= MOD31;

    h as u32
}

/// Positional base-256 value of the first four `.`-separated segments.
///
/// Any valid dotted quad maps to its 32-bit address value.
pub fn numeric_real(ip: &str) -> Option<u64> {
    let mut segments = ip.split('.');
    let mut value: u64 = 0;
    for _ in 0..4 {
        let octet: u64 = whole_decimal(segments.next()?)?;
        value = value.checked_mul(256)?.checked_add(octet)?;
    }
    Some(value)
}

/// Drops every `.` and reads the rest as a single decimal number.
pub fn simple_regex(ip: &str) -> Option<f64> {
    let digits: String = ip.chars().filter(|&c| c != '.').collect();
    whole_decimal(&digits)
}

/// Concatenates every ASCII digit of `ip` into a single decimal number.
/// Runs past 2^53 round, which piles long IPv6 digit runs onto multiples of
/// large powers of two.
pub fn simple_loop(ip: &str) -> f64 {
    let digits: String = ip.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0.0;
    }
    // Digits only, so this cannot fail; overlong runs parse as infinity.
    digits.parse().unwrap_or(f64::INFINITY)
}

/// FarmHash `fingerprint32` of the address bytes.
pub fn farmhash(ip: &str) -> u32 {
    farmhash::fingerprint32(ip.as_bytes())
}

/// [`int31`] with the seed fixed for the run.
#[derive(Debug, Clone, Copy)]
pub struct Int31 {
    pub seed: u32,
}

impl IpHasher for Int31 {
    fn name(&self) -> &'static str {
        "int31"
    }

    fn hash(&self, ip: &str) -> Option<f64> {
        Some(f64::from(int31(ip, self.seed)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumericReal;

impl IpHasher for NumericReal {
    fn name(&self) -> &'static str {
        "numeric_real"
    }

    fn hash(&self, ip: &str) -> Option<f64> {
        numeric_real(ip).map(|v| v as f64)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRegex;

impl IpHasher for SimpleRegex {
    fn name(&self) -> &'static str {
        "simple_regex"
    }

    fn hash(&self, ip: &str) -> Option<f64> {
        simple_regex(ip)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLoop;

impl IpHasher for SimpleLoop {
    fn name(&self) -> &'static str {
        "simple_loop"
    }

    fn hash(&self, ip: &str) -> Option<f64> {
        Some(simple_loop(ip))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FarmHash;

impl IpHasher for FarmHash {
    fn name(&self) -> &'static str {
        "farmhash"
    }

    fn hash(&self, ip: &str) -> Option<f64> {
        Some(f64::from(farmhash(ip)))
    }
}

/// Every candidate, in reporting order.
pub fn candidates(int31_seed: u32) -> Vec<Box<dyn IpHasher>> {
    vec![
        Box::new(Int31 { seed: int31_seed }),
        Box::new(NumericReal),
        Box::new(SimpleRegex),
        Box::new(SimpleLoop),
        Box::new(FarmHash),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int31_known_values() {
        assert_eq!(int31("0", 0), 0);
        assert_eq!(int31("1", 0), 307_143_837);
        assert_eq!(int31("192.168.10.42", 12345), 669_673_396);
        assert_eq!(int31("255.255.255.255", 999_999_999), 2_864_662_336);
        assert_eq!(int31("fe80:1:2:3.1.2.3", 5), 4_180_073_039);
        assert_eq!(int31("2001:db8::1", 42), 3_899_674_281);
        assert_eq!(int31("-5.-7", 3), 1_409_656_250);
    }

    #[test]
    fn int31_long_segments_add_their_rounded_value() {
        assert_eq!(int31("99999999999999999999.1", 0), 570_014_306);
        assert_eq!(int31("12345678901234567890123.4", 77), 822_742_912);
        assert_eq!(int31("-99999999999999999999.2", 1), 83_465_010);
        // A segment past f64 range resets the state like a non-numeric one.
        let huge = format!("{}.5", "9".repeat(400));
        assert_eq!(int31(&huge, 3), 1_534_473_963);
        assert_eq!(int31(&huge, 3), int31("x.5", 0));
    }

    #[test]
    fn int31_is_deterministic_per_seed() {
        let ip = "192.168.10.42";
        assert_eq!(int31(ip, 12345), int31(ip, 12345));
        assert_ne!(int31(ip, 12345), int31(ip, 54321));
    }

    #[test]
    fn int31_non_numeric_segment_discards_seed() {
        // The first segment has no digits, so the accumulator restarts at zero.
        let ip = "fe80:1:2:3.1.2.3";
        assert_eq!(int31(ip, 0), int31(ip, 999_999_999));
        assert_eq!(int31("", 7), int31("x", 123_456));
    }

    #[test]
    fn int31_reads_leading_digits_of_ipv6_text() {
        // "2001:db8::1" folds as 2001, matching "2001".
        assert_eq!(int31("2001:db8::1", 42), int31("2001", 42));
    }

    #[test]
    fn int31_handles_extreme_inputs() {
        for seed in [0u32, 1, 999_999_999, u32::MAX] {
            for ip in ["255.255.255.255", "99999999999999999999.1", "-5.-7", "...."] {
                // Any u32 is in range; this guards against overflow panics.
                let _ = int31(ip, seed);
            }
        }
    }

    #[test]
    fn numeric_real_matches_address_value() {
        assert_eq!(numeric_real("0.0.0.0"), Some(0));
        assert_eq!(numeric_real("1.2.3.4"), Some(0x0102_0304));
        assert_eq!(numeric_real("255.255.255.255"), Some(u64::from(u32::MAX)));
        for ip in ["10.0.0.1", "172.16.254.3", "192.168.1.255"] {
            let parsed: std::net::Ipv4Addr = ip.parse().unwrap();
            assert_eq!(numeric_real(ip), Some(u64::from(u32::from(parsed))));
        }
    }

    #[test]
    fn numeric_real_rejects_non_quads() {
        assert_eq!(numeric_real("1.2.3"), None);
        assert_eq!(numeric_real("1.2.x.4"), None);
        assert_eq!(numeric_real("2001:db8::1"), None);
        // Extra segments are ignored, empty ones read as zero.
        assert_eq!(numeric_real("1.2.3.4.5"), Some(0x0102_0304));
        assert_eq!(numeric_real("1..3.4"), Some(0x0100_0304));
    }

    #[test]
    fn digit_concatenation_collides_across_octet_boundaries() {
        assert_eq!(simple_regex("1.23.4.5"), Some(12345.0));
        assert_eq!(simple_regex("1.23.4.5"), simple_regex("12.3.4.5"));
        assert_eq!(simple_loop("1.23.4.5"), simple_loop("12.3.4.5"));
        assert_ne!(numeric_real("1.23.4.5"), numeric_real("12.3.4.5"));
    }

    #[test]
    fn simple_regex_and_loop_differ_on_ipv6() {
        let ip = "2001:db8:0:0:0:ff00:42:8329";
        assert_eq!(simple_regex(ip), None);
        assert_eq!(simple_loop(ip), 2_001_800_000_428_329.0);
        assert_eq!(simple_loop("abcd:ef"), 0.0);
    }

    #[test]
    fn simple_loop_rounds_long_digit_runs() {
        let ip = "2001:db8:85a3:1234:5678:9abc:def0:1357";
        let value = simple_loop(ip);
        // 2001885312345678901357 has no exact double.
        assert_eq!(value, 2.001_885_312_345_678_8e21);
        assert_eq!(value % 4.0, 0.0);
        assert_eq!(value % 10.0, 0.0);
        assert_eq!(simple_loop(&"9".repeat(400)), f64::INFINITY);
    }

    #[test]
    fn farmhash_is_stable() {
        assert_eq!(farmhash("10.0.0.1"), farmhash("10.0.0.1"));
        assert_ne!(farmhash("10.0.0.1"), farmhash("10.0.0.2"));
    }

    #[test]
    fn candidates_in_reporting_order() {
        let names: Vec<_> = candidates(1).iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            ["int31", "numeric_real", "simple_regex", "simple_loop", "farmhash"]
        );
    }
}
