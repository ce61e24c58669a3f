//! Numeric conversion helpers centralizing the truncating casts used by pricing and rewards.

use num_traits::cast::cast;

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Truncate a f64 toward zero and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn trunc_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).trunc();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Multiply an integer amount by a rate and truncate the product.
#[must_use]
pub fn scale_truncated(amount: i64, rate: f64) -> i64 {
    trunc_f64_to_i64(i64_to_f64(amount) * rate)
}

/// Round a value to the nearest multiple of `step`, halves rounding up.
#[must_use]
pub fn round_to_step(value: f64, step: i64) -> i64 {
    if step <= 0 {
        return trunc_f64_to_i64(value);
    }
    let step_f = i64_to_f64(step);
    trunc_f64_to_i64((value / step_f + 0.5).floor()) * step
}
