//! # Utility functions
//!
//! Small text-scanning helpers shared by the region and record parsers.
//! Input lines are scanned token by token instead of being split up front, because
//! the record grammar tolerates trailing junk after numbers and after the last field.

/// Split `s` into its first whitespace-delimited token and the remainder following it.
/// Leading whitespace is skipped. Returns `None` if `s` contains only whitespace.
///
/// # Examples
///
/// ```
/// let (token, rest) = ploidy::utils::next_token("  chrX\t1\t100").unwrap();
/// assert_eq!("chrX", token);
/// assert_eq!("\t1\t100", rest);
/// assert!(ploidy::utils::next_token(" \t ").is_none());
/// ```
pub fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some(s.split_at(end))
}

/// Parse the run of ASCII digits at the start of `s` as an unsigned decimal.
/// Returns the value and the unparsed remainder, or `None` if `s` does not start with
/// a digit or the value overflows.
///
/// # Examples
///
/// ```
/// assert_eq!(Some((150, "x")), ploidy::utils::parse_decimal_prefix("150x"));
/// assert_eq!(None, ploidy::utils::parse_decimal_prefix("x150"));
/// ```
pub fn parse_decimal_prefix(s: &str) -> Option<(u64, &str)> {
    let n_digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if n_digits == 0 {
        return None;
    }
    let value = s[..n_digits].parse().ok()?;
    Some((value, &s[n_digits..]))
}

/// Parse a base-10 integer the way C's `strtol` does: leading whitespace is skipped,
/// an optional sign is accepted, and anything after the digits is ignored.
///
/// # Examples
///
/// ```
/// assert_eq!(Some(2), ploidy::utils::parse_int_prefix(" 2\tsomething"));
/// assert_eq!(Some(-1), ploidy::utils::parse_int_prefix("-1"));
/// assert_eq!(Some(1), ploidy::utils::parse_int_prefix("+1abc"));
/// assert_eq!(None, ploidy::utils::parse_int_prefix("two"));
/// ```
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (value, _) = parse_decimal_prefix(digits)?;
    let value = i64::try_from(value).ok()?;
    Some(if negative { -value } else { value })
}
