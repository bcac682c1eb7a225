//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

const UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count with SI units and three significant digits
///
/// Negative counts keep their sign, zero renders as `0 B`.
///
/// # Examples
///
/// ```
/// use size_report::fmt::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.02 kB");
/// assert_eq!(format_bytes(-1200), "-1.2 kB");
/// assert_eq!(format_bytes(2_500_000), "2.5 MB");
/// ```
pub fn format_bytes(bytes: i64) -> String {
    let prefix = if bytes < 0 { "-" } else { "" };
    let magnitude = bytes.unsigned_abs() as f64;

    if magnitude < 1.0 {
        return format!("{}0 B", prefix);
    }

    let exponent = ((magnitude.log10() / 3.0).floor() as usize).min(UNITS.len() - 1);
    let scaled = magnitude / 1000f64.powi(exponent as i32);

    format!("{}{} {}", prefix, to_precision(scaled, 3), UNITS[exponent])
}

/// Format an unsigned size, e.g. a snapshot entry
pub fn format_size(bytes: u64) -> String {
    format_bytes(i64::try_from(bytes).unwrap_or(i64::MAX))
}

/// Format a signed delta with an explicit `+` for growth
///
/// # Examples
///
/// ```
/// use size_report::fmt::format_signed_bytes;
///
/// assert_eq!(format_signed_bytes(200), "+200 B");
/// assert_eq!(format_signed_bytes(-200), "-200 B");
/// assert_eq!(format_signed_bytes(0), "0 B");
/// ```
pub fn format_signed_bytes(delta: i64) -> String {
    let sign = if delta > 0 { "+" } else { "" };
    format!("{}{}", sign, format_bytes(delta))
}

/// Percentage of `delta` relative to `baseline`, rounded half towards +inf
///
/// Returns `None` when the baseline is zero.
pub fn percentage(delta: i64, baseline: i64) -> Option<i64> {
    if baseline == 0 {
        return None;
    }
    let ratio = delta as f64 * 100.0 / baseline as f64;
    Some(round_half_up(ratio) as i64)
}

/// Format a percentage with an explicit `+` for positive values, e.g. `+20%`
pub fn format_percentage(percent: i64) -> String {
    let sign = if percent > 0 { "+" } else { "" };
    format!("{}{}%", sign, percent)
}

/// Round to the nearest integer, ties going towards positive infinity
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round `value` to `digits` significant digits
fn to_precision(value: f64, digits: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}
