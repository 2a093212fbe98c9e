//! Numeric normalization utilities.

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a string as an integer.
///
/// Exports written by float-typed tools carry ids as `12.0`; integral decimals
/// are accepted, anything with a fractional part is not.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let float = parse_f64(trimmed)?;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let in_range = float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64;
    #[allow(clippy::cast_possible_truncation)]
    in_range.then(|| float as i64)
}

/// Parses a flag value.
///
/// Accepts `1/0`, `true/false`, `t/f`, `yes/no` and `y/n`, case-insensitively.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}
