//! Textual duration grammar.
//!
//! Accepts one or more `<number>[.<fraction>]<unit>` groups such as `5m`,
//! `1h30m` or `1.5s`, an optional leading `+`, and the bare literal `0`.
//! Recognised units are `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m` and `h`.

use std::time::Duration;

use thiserror::Error;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Upper bound on fraction digits; further digits cannot change the result.
const MAX_FRACTION_DIGITS: usize = 19;

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("h", 3_600 * NANOS_PER_SECOND),
];

/// Reasons a duration string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DurationError {
    /// The input is empty or structurally malformed.
    #[error("invalid duration {0:?}")]
    Invalid(String),
    /// A number is not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    /// A number is followed by an unknown unit.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognised unit text.
        unit: String,
        /// The full input.
        input: String,
    },
    /// The duration is negative.
    #[error("negative duration {0:?} is not supported")]
    Negative(String),
    /// The duration exceeds [`Duration::MAX`].
    #[error("duration {0:?} overflows")]
    Overflow(String),
}

/// Parse a textual duration.
///
/// ```
/// use std::time::Duration;
/// use env_config::parse_duration;
///
/// assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5_400)));
/// assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1_500)));
/// ```
///
/// # Errors
///
/// Returns a [`DurationError`] when the text does not follow the grammar,
/// is negative, or overflows.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(DurationError::Invalid(input.to_owned()));
    }

    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (nanos, remaining) = parse_group(rest, input)?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| DurationError::Overflow(input.to_owned()))?;
        rest = remaining;
    }

    if negative && total > 0 {
        return Err(DurationError::Negative(input.to_owned()));
    }
    to_duration(total).ok_or_else(|| DurationError::Overflow(input.to_owned()))
}

/// Parse one `<number><unit>` group, returning its nanoseconds and the tail.
fn parse_group<'a>(text: &'a str, input: &str) -> Result<(u128, &'a str), DurationError> {
    let (whole, after_whole) = take_digits(text);
    let (fraction, after_number) = match after_whole.strip_prefix('.') {
        Some(tail) => {
            let (digits, tail) = take_digits(tail);
            (Some(digits), tail)
        }
        None => (None, after_whole),
    };
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(DurationError::Invalid(input.to_owned()));
    }

    let unit_len = after_number
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(after_number.len());
    let (unit, tail) = after_number.split_at(unit_len);
    if unit.is_empty() {
        return Err(DurationError::MissingUnit(input.to_owned()));
    }
    let scale = UNITS
        .iter()
        .find_map(|(name, scale)| (*name == unit).then_some(*scale))
        .ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_owned(),
            input: input.to_owned(),
        })?;

    let overflow = || DurationError::Overflow(input.to_owned());
    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let mut nanos = whole_value.checked_mul(scale).ok_or_else(overflow)?;
    if let Some(digits) = fraction {
        nanos = nanos
            .checked_add(fraction_nanos(digits, scale))
            .ok_or_else(overflow)?;
    }
    Ok((nanos, tail))
}

/// Convert the fractional digits of a group into nanoseconds of `scale`.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in digits
        .chars()
        .take(MAX_FRACTION_DIGITS)
        .filter_map(|c| c.to_digit(10))
    {
        numerator = numerator * 10 + u128::from(digit);
        denominator *= 10;
    }
    (numerator * scale).checked_div(denominator).unwrap_or(0)
}

fn take_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn to_duration(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos.checked_div(NANOS_PER_SECOND)?).ok()?;
    let subsec = u32::try_from(nanos.checked_rem(NANOS_PER_SECOND)?).ok()?;
    Some(Duration::new(secs, subsec))
}
