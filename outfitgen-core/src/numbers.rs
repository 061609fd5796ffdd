//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a rounded f64 to i64, saturating out-of-range values and returning 0 for NaN.
fn saturate_to_i64(rounded: f64) -> i64 {
    if rounded.is_nan() {
        return 0;
    }
    cast::<f64, i64>(rounded).unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Round a f64 half away from zero and saturate it to the i64 range.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    saturate_to_i64(value.round())
}

/// Round a f64 half to even and saturate it to the i64 range.
#[must_use]
pub fn round_half_even_f64_to_i64(value: f64) -> i64 {
    saturate_to_i64(value.round_ties_even())
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}
