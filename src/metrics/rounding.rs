//! Rounding policy shared by every funnel stage.

/// Round to the nearest whole number, halves toward positive infinity.
///
/// `2.5 -> 3.0`, `-2.5 -> -2.0`. NaN and infinities pass through unchanged.
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Convert an already-rounded value to a count.
///
/// Saturates at the `i64` bounds; NaN becomes zero.
pub fn to_count(rounded: f64) -> i64 {
    rounded as i64
}
