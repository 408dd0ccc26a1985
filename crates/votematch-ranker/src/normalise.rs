//! Score normalisation functions.
//! Axis scores saturate at ±100; similarities map average distance onto [0, 100].

pub const AXIS_MIN: f64 = -100.0;
pub const AXIS_MAX: f64 = 100.0;

/// Saturating clamp of an accumulated axis score into [-100, 100].
/// Values outside the range are truncated, not rescaled.
pub fn clamp_axis_score(raw: f64) -> f64 {
    raw.clamp(AXIS_MIN, AXIS_MAX)
}

/// Mean of per-axis absolute differences. An empty set averages to 0.
pub fn mean_abs_difference(diffs: &[f64]) -> f64 {
    if diffs.is_empty() {
        return 0.0;
    }
    diffs.iter().sum::<f64>() / diffs.len() as f64
}

/// Inverse-distance similarity: `round(max(0, 100 - avg_difference))`.
pub fn similarity_from_difference(avg_difference: f64) -> u8 {
    (100.0 - avg_difference).max(0.0).min(100.0).round() as u8
}
