//! Duration string parsing
//!
//! Grammar: `[-+]? (digits? ("." digits?)? unit)+`, or a bare `"0"`.
//! Each token is scaled to nanoseconds and summed in a `u64` magnitude
//! bounded by 2^63, so `-2562047h47m16.854775808s` is the only value that
//! reaches `i64::MIN`.

use tracing::debug;

use super::Duration;
use crate::error::{FunksError, ParseErrorKind, Result};

/// Largest magnitude before the sign is applied
const MAX_MAGNITUDE: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60_000_000_000),
        "h" => Some(3_600_000_000_000),
        _ => None,
    }
}

pub(super) fn parse(input: &str) -> Result<Duration> {
    parse_nanos(input).map(Duration::from_nanos).map_err(|kind| {
        debug!(input, %kind, "rejected duration string");
        FunksError::parse(input, kind)
    })
}

pub(super) fn parse_nanos(input: &str) -> std::result::Result<i64, ParseErrorKind> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(ParseErrorKind::Empty);
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let first = s.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(ParseErrorKind::InvalidNumber);
        }

        let (mut value, rest) = leading_int(s)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (digits, digits_scale, after) = leading_fraction(rest);
            has_fraction = after.len() != rest.len();
            fraction = digits;
            scale = digits_scale;
            s = after;
        }
        if !has_whole && !has_fraction {
            return Err(ParseErrorKind::InvalidNumber);
        }

        // Split points are ASCII, so both halves stay on char boundaries
        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(ParseErrorKind::MissingUnit);
        }
        let (unit, rest) = s.split_at(unit_end);
        s = rest;
        let unit = unit_nanos(unit).ok_or_else(|| ParseErrorKind::UnknownUnit(unit.to_string()))?;

        if value > MAX_MAGNITUDE / unit {
            return Err(ParseErrorKind::Overflow);
        }
        value *= unit;
        if fraction > 0 {
            value += (fraction as f64 * (unit as f64 / scale)) as u64;
            if value > MAX_MAGNITUDE {
                return Err(ParseErrorKind::Overflow);
            }
        }

        total = total
            .checked_add(value)
            .filter(|t| *t <= MAX_MAGNITUDE)
            .ok_or(ParseErrorKind::Overflow)?;
    }

    if negative {
        // 2^63 wraps onto i64::MIN, which is exactly its negation
        return Ok((total as i64).wrapping_neg());
    }
    i64::try_from(total).map_err(|_| ParseErrorKind::Overflow)
}

/// Consume leading digits as an integer
fn leading_int(s: &str) -> std::result::Result<(u64, &str), ParseErrorKind> {
    let end = digits_end(s);
    let mut x: u64 = 0;
    for c in s[..end].bytes() {
        if x > MAX_MAGNITUDE / 10 {
            return Err(ParseErrorKind::Overflow);
        }
        x = x * 10 + u64::from(c - b'0');
        if x > MAX_MAGNITUDE {
            return Err(ParseErrorKind::Overflow);
        }
    }
    Ok((x, &s[end..]))
}

/// Consume leading digits as a fraction, returning `(digits, 10^kept, rest)`
///
/// Digits past the representable precision are consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = digits_end(s);
    let mut x: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for c in s[..end].bytes() {
        if saturated {
            continue;
        }
        if x > (i64::MAX as u64) / 10 {
            saturated = true;
            continue;
        }
        let y = x * 10 + u64::from(c - b'0');
        if y > MAX_MAGNITUDE {
            saturated = true;
            continue;
        }
        x = y;
        scale *= 10.0;
    }
    (x, scale, &s[end..])
}

fn digits_end(s: &str) -> usize {
    s.bytes()
        .position(|c| !c.is_ascii_digit())
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nanos(s: &str) -> i64 {
        parse_nanos(s).unwrap_or_else(|e| panic!("{s:?} should parse: {e}"))
    }

    fn kind(s: &str) -> ParseErrorKind {
        parse_nanos(s).expect_err(s)
    }

    #[test]
    fn single_units() {
        assert_eq!(nanos("7ns"), 7);
        assert_eq!(nanos("3us"), 3_000);
        assert_eq!(nanos("3µs"), 3_000);
        assert_eq!(nanos("3μs"), 3_000);
        assert_eq!(nanos("300ms"), 300_000_000);
        assert_eq!(nanos("5s"), 5_000_000_000);
        assert_eq!(nanos("2m"), 120_000_000_000);
        assert_eq!(nanos("1h"), 3_600_000_000_000);
    }

    #[test]
    fn compound_tokens_are_summed() {
        assert_eq!(nanos("2h45m"), 9_900_000_000_000);
        assert_eq!(nanos("1h15m30.918273645s"), 4_530_918_273_645);
        assert_eq!(nanos("1m30s"), nanos("90s"));
        // Units may repeat and appear in any order
        assert_eq!(nanos("1s1s"), 2_000_000_000);
        assert_eq!(nanos("10ms1h"), 3_600_010_000_000);
    }

    #[test]
    fn fractions() {
        assert_eq!(nanos("1.5h"), 5_400_000_000_000);
        assert_eq!(nanos(".5s"), 500_000_000);
        assert_eq!(nanos("1.s"), 1_000_000_000);
        assert_eq!(nanos("1.004s"), 1_004_000_000);
        assert_eq!(nanos("100.00100s"), 100_001_000_000);
        // Sub-nanosecond precision is truncated
        assert_eq!(nanos("1.9ns"), 1);
        assert_eq!(nanos("0.3333333333333333333h"), 1_200_000_000_000);
    }

    #[test]
    fn signs_and_zero() {
        assert_eq!(nanos("0"), 0);
        assert_eq!(nanos("+0"), 0);
        assert_eq!(nanos("-0"), 0);
        assert_eq!(nanos("0s"), 0);
        assert_eq!(nanos("-5s"), -5_000_000_000);
        assert_eq!(nanos("+5s"), 5_000_000_000);
        assert_eq!(nanos("-1.5m"), -90_000_000_000);
    }

    #[test]
    fn range_limits() {
        assert_eq!(nanos("9223372036854775807ns"), i64::MAX);
        assert_eq!(nanos("-9223372036854775808ns"), i64::MIN);
        assert_eq!(nanos("2562047h47m16.854775807s"), i64::MAX);
        assert_eq!(nanos("-2562047h47m16.854775808s"), i64::MIN);
    }

    #[test]
    fn overflow() {
        assert_eq!(kind("9223372036854775808ns"), ParseErrorKind::Overflow);
        assert_eq!(kind("9223372036854775810ns"), ParseErrorKind::Overflow);
        assert_eq!(kind("3000000h"), ParseErrorKind::Overflow);
        assert_eq!(kind("2562047h48m"), ParseErrorKind::Overflow);
        assert_eq!(kind("-9223372036854775809ns"), ParseErrorKind::Overflow);
        assert_eq!(kind("99999999999999999999s"), ParseErrorKind::Overflow);
    }

    #[test]
    fn empty_and_sign_only() {
        assert_eq!(kind(""), ParseErrorKind::Empty);
        assert_eq!(kind("-"), ParseErrorKind::Empty);
        assert_eq!(kind("+"), ParseErrorKind::Empty);
    }

    #[test]
    fn missing_unit() {
        assert_eq!(kind("5"), ParseErrorKind::MissingUnit);
        assert_eq!(kind("1s5"), ParseErrorKind::MissingUnit);
        assert_eq!(kind("1.5"), ParseErrorKind::MissingUnit);
    }

    #[test]
    fn unknown_unit() {
        assert_eq!(kind("5xyz"), ParseErrorKind::UnknownUnit("xyz".into()));
        assert_eq!(kind("5sec"), ParseErrorKind::UnknownUnit("sec".into()));
        assert_eq!(kind("1d"), ParseErrorKind::UnknownUnit("d".into()));
        assert_eq!(kind("5 s"), ParseErrorKind::UnknownUnit(" s".into()));
        assert_eq!(kind("1h-2m"), ParseErrorKind::UnknownUnit("h-".into()));
    }

    #[test]
    fn invalid_number() {
        assert_eq!(kind("x"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind("s"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind(".s"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind("--5s"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind(" 5s"), ParseErrorKind::InvalidNumber);
    }

    #[test]
    fn parse_wraps_kind_with_input() {
        let err = parse("5xyz").unwrap_err();
        match err {
            FunksError::DurationParse { input, kind } => {
                assert_eq!(input, "5xyz");
                assert_eq!(kind, ParseErrorKind::UnknownUnit("xyz".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
