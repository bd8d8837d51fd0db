//! Plain-text rendering of a run.

use std::io::{self, Write};

use crate::generator::AddressFamily;
use crate::scatter::{Measurement, Scatter};

pub fn write_generating<W: Write>(
    out: &mut W,
    family: AddressFamily,
    count: usize,
) -> io::Result<()> {
    writeln!(out, "Generating {count} IPs ({family})...")
}

/// `{ 0: 12, 1: 9, NaN: 3 }`, or `{}` when nothing was recorded.
pub fn format_scatter(scatter: &Scatter) -> String {
    if scatter.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = scatter.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{ {} }}", entries.join(", "))
}

pub fn write_measurement<W: Write>(out: &mut W, m: &Measurement) -> io::Result<()> {
    writeln!(out, "benchmarking {}...", m.name)?;
    writeln!(out, "  time (ms): {}", m.elapsed.as_millis())?;
    writeln!(out, "  scatter: {}", format_scatter(&m.scatter))
}

pub fn write_family<W: Write>(
    out: &mut W,
    family: AddressFamily,
    measurements: &[Measurement],
) -> io::Result<()> {
    writeln!(out, "{family}")?;
    writeln!(out, "----------")?;
    for m in measurements {
        write_measurement(out, m)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scatter::BucketKey;
    use std::time::Duration;

    #[test]
    fn empty_scatter() {
        assert_eq!(format_scatter(&Scatter::default()), "{}");
    }

    #[test]
    fn family_block_layout() {
        let mut scatter = Scatter::default();
        scatter.record(BucketKey::Index(1));
        scatter.record(BucketKey::Index(0));
        scatter.record(BucketKey::Index(1));
        scatter.record(BucketKey::NotANumber);
        let m = Measurement {
            name: "numeric_real",
            elapsed: Duration::from_millis(12),
            scatter,
        };

        let mut out = Vec::new();
        write_family(&mut out, AddressFamily::V4, &[m]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "IPv4\n\
             ----------\n\
             benchmarking numeric_real...\n  \
             time (ms): 12\n  \
             scatter: { 0: 1, 1: 2, NaN: 1 }\n"
        );
    }

    #[test]
    fn generating_line() {
        let mut out = Vec::new();
        write_generating(&mut out, AddressFamily::V6, 500).unwrap();
        assert_eq!(out, b"Generating 500 IPs (IPv6)...\n");
    }
}
