//! Text-to-number coercion for collected fields.
//!
//! Anything that is not a number becomes zero. There is deliberately no
//! range checking here; out-of-range values reach the engine as typed.

/// Parse a leading integer, ignoring surrounding whitespace and any
/// trailing characters. No digits means zero.
///
/// `"12abc" -> 12`, `"3.7" -> 3`, `"-5" -> -5`, `"abc" -> 0`.
pub fn coerce_count(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}

/// Monetary fields use the same integer coercion as counts.
pub fn coerce_amount(raw: &str) -> f64 {
    coerce_count(raw) as f64
}

/// Percentages accept decimals and an optional trailing `%`.
///
/// Falls back to integer coercion for inputs like `"27abc"`; non-finite
/// values become zero.
pub fn coerce_rate(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        Ok(_) => 0.0,
        Err(_) => coerce_count(number) as f64,
    }
}
