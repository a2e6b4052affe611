//! Display formatting for counts, money, ratios and percentages.

/// Insert thousands separators into a run of ASCII digits.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `12345 -> "12,345"`, `-1234 -> "-1,234"`.
pub fn format_count(value: i64) -> String {
    let digits = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Whole dollars when there are no cents, otherwise two decimals.
///
/// `9000.0 -> "$9,000"`, `-1500.0 -> "-$1,500"`, `12.5 -> "$12.50"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let fraction = (cents - whole * 100.0) as u64;
    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    let dollars = group_digits(&format!("{whole:.0}"));

    if fraction == 0 {
        format!("{sign}${dollars}")
    } else {
        format!("{sign}${dollars}.{fraction:02}")
    }
}

/// Annual figures in thousands: `90000.0 -> "$90K"`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    // Adding zero folds a rounded -0.0 into 0.0.
    let thousands = (value / 1000.0).round() + 0.0;
    if thousands < 0.0 {
        format!("-${}K", group_digits(&format!("{:.0}", thousands.abs())))
    } else {
        format!("${}K", group_digits(&format!("{thousands:.0}")))
    }
}

/// ROI multiple with one decimal: `6.0 -> "6.0x"`.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.1}x")
}

/// `27.0 -> "27%"`, `27.5 -> "27.5%"`.
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}%")
    } else {
        format!("{value}%")
    }
}
