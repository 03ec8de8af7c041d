//! Foreign-to-home currency conversion.

/// Convert a whole-line foreign (KRW) amount into home (TWD) units.
///
/// The stored exchange rate may be oriented either way, and historic data
/// contains both. Rates above 1 are read as "KRW per 1 TWD" and divide;
/// rates at or below 1 are read as "TWD per 1 KRW" and multiply. Results
/// round to the nearest whole home unit.
///
/// Fails closed: any non-positive or non-finite input yields `0.0`, so a
/// half-filled form never produces a bogus cost.
pub fn to_home(foreign_total: f64, rate: f64) -> f64 {
    if !foreign_total.is_finite() || !rate.is_finite() {
        return 0.0;
    }
    if foreign_total <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    if rate > 1.0 {
        (foreign_total / rate).round()
    } else {
        tracing::debug!(rate, "rate at or below 1, treated as home-per-foreign multiplier");
        (foreign_total * rate).round()
    }
}
