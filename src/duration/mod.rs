//! # Duration
//!
//! A signed nanosecond interval that reads and writes the Go duration
//! grammar (`"300ms"`, `"-1.5h"`, `"2h45m"`).
//!
//! ## Codecs
//!
//! | Boundary | Input | Output |
//! |----------|-------|--------|
//! | TOML ([`text`]) | string only | canonical string |
//! | JSON ([`json`], default serde impls) | nanosecond count or string | canonical string |
//!
//! ```rust
//! use funks::Duration;
//!
//! let d = Duration::parse("90s").unwrap();
//! assert_eq!(d.to_string(), "1m30s");
//! assert_eq!(d.as_nanos(), 90_000_000_000);
//!
//! let from_number: Duration = serde_json::from_str("7").unwrap();
//! assert_eq!(from_number.to_string(), "7ns");
//! ```

mod format;
pub mod json;
mod parse;
pub mod text;

use std::str::FromStr;

use crate::error::{FunksError, Result};

/// Nanoseconds per second
pub(crate) const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Elapsed time with nanosecond resolution
///
/// Negative intervals are representable. The range is that of `i64`
/// nanoseconds (about ±292 years).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration::from_nanos(0);
    pub const NANOSECOND: Duration = Duration::from_nanos(1);
    pub const MICROSECOND: Duration = Duration::from_nanos(1_000);
    pub const MILLISECOND: Duration = Duration::from_nanos(1_000_000);
    pub const SECOND: Duration = Duration::from_nanos(1_000_000_000);
    pub const MINUTE: Duration = Duration::from_nanos(60_000_000_000);
    pub const HOUR: Duration = Duration::from_nanos(3_600_000_000_000);
    pub const MIN: Duration = Duration::from_nanos(i64::MIN);
    pub const MAX: Duration = Duration::from_nanos(i64::MAX);

    /// Wrap a raw nanosecond count
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Wrap a native elapsed-time value (saturates at [`Duration::MAX`])
    pub fn new(native: std::time::Duration) -> Self {
        Self::from_nanos(i64::try_from(native.as_nanos()).unwrap_or(i64::MAX))
    }

    /// Parse a duration string such as `"5s"` or `"1h15m30.5s"`
    ///
    /// Accepted units: `ns`, `us` (also `µs`, `μs`), `ms`, `s`, `m`, `h`.
    /// A leading sign is allowed and `"0"` is the only unit-less value.
    pub fn parse(text: &str) -> Result<Self> {
        parse::parse(text)
    }

    /// Fallible construction from a string, same as [`Duration::parse`]
    pub fn from_string(text: &str) -> Result<Self> {
        Self::parse(text)
    }

    /// Construction from a string that the caller asserts is valid
    ///
    /// # Panics
    ///
    /// Panics with a `FUNKS-003` fatal construction error when `text` is not
    /// a valid duration. This is not a recoverable error: use
    /// [`Duration::from_string`] for untrusted input.
    pub fn must_parse(text: &str) -> Self {
        match parse::parse_nanos(text) {
            Ok(nanos) => Self::from_nanos(nanos),
            Err(kind) => panic!(
                "{}",
                FunksError::FatalConstruction {
                    input: text.to_string(),
                    kind,
                }
            ),
        }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }

    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    /// Native value, or `None` for negative durations
    pub fn to_std(self) -> Option<std::time::Duration> {
        u64::try_from(self.nanos)
            .ok()
            .map(std::time::Duration::from_nanos)
    }
}

impl From<std::time::Duration> for Duration {
    fn from(native: std::time::Duration) -> Self {
        Self::new(native)
    }
}

impl FromStr for Duration {
    type Err = FunksError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
