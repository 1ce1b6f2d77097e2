//! Percentage and fraction arithmetic shared by the summaries.

/// Upper bound of a progress percentage.
pub const MAX_PERCENT: u8 = 100;

/// Round and clamp an arbitrary value into `0..=100`.
///
/// Non-finite input collapses to 0.
#[must_use]
pub fn clamp_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.round().clamp(0.0, f64::from(MAX_PERCENT));
    // `clamped` is an integral value in 0..=100.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = clamped as u8;
    percent
}

/// `round(completed / total * 100)` clamped to `0..=100`; 0 when `total == 0`.
#[must_use]
pub fn ratio_percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    clamp_percent(f64::from(completed) / f64::from(total) * 100.0)
}

/// Same as `ratio_percent` for loosely typed server counts, before truncation.
///
/// 0 when `total` is not positive.
#[must_use]
pub fn ratio_percent_f64(completed: f64, total: f64) -> u8 {
    if total.is_nan() || total <= 0.0 {
        return 0;
    }
    clamp_percent(completed / total * 100.0)
}

/// Clamp a fraction into `0.0..=1.0`; non-finite input collapses to 0.
#[must_use]
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Convert a fraction into a whole percentage.
#[must_use]
pub fn fraction_percent(value: f64) -> u8 {
    clamp_percent(clamp_fraction(value) * 100.0)
}

/// Convert a loosely typed server count into a non-negative integer.
///
/// Negative and non-finite values become 0; fractions are truncated.
#[must_use]
pub fn count_from(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value.trunc() as u32;
    count
}
