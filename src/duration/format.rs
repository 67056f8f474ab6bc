//! Canonical duration encoding
//!
//! - zero is `0s`
//! - below one second: a single `ns`, `µs` or `ms` unit with a trimmed
//!   decimal fraction (`1.5µs`, `300ms`)
//! - otherwise `h`/`m`/`s`, omitting only leading zero units (`1m0s`,
//!   `2h45m0s`, `1h0m0.5s`)
//!
//! The output always parses back to the same nanosecond count.

use std::fmt;

use super::{Duration, NANOS_PER_SECOND};

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.as_nanos().unsigned_abs();
        if magnitude == 0 {
            return f.write_str("0s");
        }
        if self.is_negative() {
            f.write_str("-")?;
        }

        if magnitude < NANOS_PER_SECOND {
            let (precision, unit) = match magnitude {
                m if m < 1_000 => (0, "ns"),
                m if m < 1_000_000 => (3, "\u{b5}s"),
                _ => (6, "ms"),
            };
            write_decimal(f, magnitude, precision)?;
            return f.write_str(unit);
        }

        let seconds = magnitude / NANOS_PER_SECOND;
        let minutes = seconds / 60;
        let hours = minutes / 60;
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes % 60)?;
        }
        let subsec = magnitude % NANOS_PER_SECOND;
        write_decimal(f, (seconds % 60) * NANOS_PER_SECOND + subsec, 9)?;
        f.write_str("s")
    }
}

/// Write `value / 10^precision` without trailing fractional zeros
fn write_decimal(f: &mut fmt::Formatter<'_>, value: u64, precision: u32) -> fmt::Result {
    let scale = 10u64.pow(precision);
    write!(f, "{}", value / scale)?;

    let fraction = value % scale;
    if fraction == 0 {
        return Ok(());
    }
    let digits = format!("{:0width$}", fraction, width = precision as usize);
    write!(f, ".{}", digits.trim_end_matches('0'))
}
