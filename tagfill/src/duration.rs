//! Duration expressions such as `1m10s`, `1.5h` or `300ms`.
//!
//! A duration is an optional sign followed by one or more decimal numbers, each
//! with an optional fraction and a mandatory unit. Valid units are `ns`, `us`
//! (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` needs no unit.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration `{0}`")]
    Invalid(String),

    #[error("missing unit in duration `{0}`")]
    MissingUnit(String),

    #[error("unknown unit `{unit}` in duration `{input}`")]
    UnknownUnit { unit: String, input: String },

    #[error("duration `{0}` does not fit in 64 bits of nanoseconds")]
    Overflow(String),

    #[error("negative duration `{0}` cannot be represented")]
    Negative(String),
}

// Fraction digits past this scale are parsed but ignored.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 60 * 60 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses a duration expression into a [`Duration`].
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole_digits, after_whole) = split_digits(rest);
        let mut whole: u128 = 0;
        for digit in whole_digits.bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|v| v.checked_add(u128::from(digit - b'0')))
                .filter(|v| *v <= u128::from(u64::MAX))
                .ok_or_else(overflow)?;
        }
        rest = after_whole;

        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut fraction_digits = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, after_fraction) = split_digits(after_dot);
            for digit in digits.bytes() {
                if scale < MAX_FRACTION_SCALE {
                    fraction = fraction * 10 + u128::from(digit - b'0');
                    scale *= 10;
                }
            }
            fraction_digits = digits;
            rest = after_fraction;
        }
        if whole_digits.is_empty() && fraction_digits.is_empty() {
            return Err(invalid());
        }

        let unit_end = rest.find(|c: char| c == '.' || c.is_ascii_digit()).unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let (unit, after_unit) = rest.split_at(unit_end);
        let per_unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        rest = after_unit;

        let term = whole
            .checked_mul(per_unit)
            .and_then(|v| v.checked_add(fraction * per_unit / scale))
            .ok_or_else(overflow)?;
        total = total.checked_add(term).ok_or_else(overflow)?;
    }

    let nanos = u64::try_from(total).map_err(|_| overflow())?;
    if negative && nanos != 0 {
        return Err(DurationError::Negative(input.to_string()));
    }
    Ok(Duration::from_nanos(nanos))
}
