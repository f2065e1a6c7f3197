//! Environment variable parsing helpers.

use crate::error::{Error, Result};

/// Largest integer representable without precision loss in an IEEE-754 double.
///
/// Tools downstream of CI (JSON consumers in particular) treat numbers as
/// doubles, so anything outside this range is rejected.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Parse a raw environment value as an integer.
///
/// Returns `default` when the value is absent, empty, or the literal
/// `"false"` (Travis sets `TRAVIS_PULL_REQUEST=false` on push builds).
/// Otherwise the value is read like a lenient base-10 parse: leading
/// whitespace is skipped, an optional sign is accepted, and the longest run
/// of digits that follows is used. Anything after it is ignored, so `"4.2"`
/// reads as 4 and `"42abc"` as 42.
///
/// # Errors
/// Returns [`Error::InvalidInteger`] if there are no leading digits or the
/// result is outside `±MAX_SAFE_INTEGER`.
pub fn parse_int(variable: &str, raw: Option<&str>, default: Option<i64>) -> Result<Option<i64>> {
    let raw = match raw {
        None | Some("" | "false") => return Ok(default),
        Some(raw) => raw,
    };

    let invalid = || Error::InvalidInteger {
        variable: variable.to_string(),
    };

    let value = leading_int(raw).ok_or_else(invalid)?;
    if !(-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
        return Err(invalid());
    }

    Ok(Some(value))
}

/// Signed digit prefix of `raw` after leading whitespace.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }

    // Overflowing i64 is far outside the safe range anyway
    let magnitude: i64 = unsigned[..len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Read and parse an integer from the process environment.
///
/// # Errors
/// See [`parse_int`].
pub fn env_int(variable: &str, default: Option<i64>) -> Result<Option<i64>> {
    let raw = std::env::var(variable).ok();
    parse_int(variable, raw.as_deref(), default)
}

/// Treat an empty value the same as an unset one.
pub(crate) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}
