// ---------------------------------------------------------------------------
// Axis title exponent and tick labels
// ---------------------------------------------------------------------------

/// Decade exponent of a tenth of the visible range, as printed in
/// one-decimal scientific notation (`2.5e-4` → `-4`, `9.96` → `1`).
///
/// Empty, inverted and non-finite ranges give `0`.
pub fn axis_exponent(min: f64, max: f64) -> i32 {
    let scale = (max - min) / 10.0;
    if !scale.is_finite() || scale <= 0.0 {
        return 0;
    }
    format!("{scale:.1e}")
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// Tick label for `value` on an axis titled with `exponent`.
pub fn format_tick(value: f64, exponent: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{:.2}", value / 10f64.powi(exponent))
}
