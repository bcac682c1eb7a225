//! Severity icons and delta cells

use crate::fmt::{format_bytes, format_percentage, percentage};

const NEW: &str = "🆕";

/// Increase brackets, largest first
const INCREASES: [(i64, &str); 4] = [(50, "🆘"), (20, "🚨"), (10, "⚠️"), (5, "🔍")];

/// Decrease brackets, largest first
const DECREASES: [(i64, &str); 4] = [(-50, "🏆"), (-20, "🎉"), (-10, "👏"), (-5, "✅")];

/// Icon for a change relative to its baseline size
///
/// A zero baseline is always new. Otherwise the largest bracket the rounded
/// percentage reaches wins, followed by a direction note for any non-zero
/// percentage.
///
/// # Examples
///
/// ```
/// use size_report::report::severity_icon;
///
/// assert_eq!(severity_icon(500, 0), "🆕");
/// assert_eq!(severity_icon(200, 1000), "🚨 <sub>_(Size Increased)_</sub>");
/// assert_eq!(severity_icon(-600, 1000), "🏆 <sub>_(Size Decreased)_</sub>");
/// assert_eq!(severity_icon(10, 1000), " <sub>_(Size Increased)_</sub>");
/// assert_eq!(severity_icon(0, 1000), "");
/// ```
pub fn severity_icon(delta: i64, baseline: i64) -> String {
    let Some(percent) = percentage(delta, baseline) else {
        return NEW.to_string();
    };

    let icon = if percent > 0 {
        INCREASES.iter().find(|(at, _)| percent >= *at)
    } else {
        DECREASES.iter().find(|(at, _)| percent <= *at)
    }
    .map_or("", |(_, icon)| *icon);

    let direction = match percent {
        p if p > 0 => " <sub>_(Size Increased)_</sub>",
        p if p < 0 => " <sub>_(Size Decreased)_</sub>",
        _ => "",
    };

    format!("{}{}", icon, direction)
}

/// Signed delta text with a percentage when it is meaningful
///
/// No change renders as `-`. The percentage is left out for a zero
/// baseline and for a change that removes the whole baseline.
///
/// # Examples
///
/// ```
/// use size_report::report::delta_text;
///
/// assert_eq!(delta_text(200, 1000), "+200 B (+20%)");
/// assert_eq!(delta_text(-1000, 1000), "-1 kB");
/// assert_eq!(delta_text(500, 0), "+500 B");
/// assert_eq!(delta_text(0, 1000), "-");
/// ```
pub fn delta_text(delta: i64, baseline: i64) -> String {
    if delta == 0 {
        return "-".to_string();
    }

    let sign = if delta > 0 { "+" } else { "" };
    let base = format!("{}{}", sign, format_bytes(delta));

    if baseline == -delta {
        return base;
    }
    match percentage(delta, baseline) {
        Some(percent) => format!("{} ({})", base, format_percentage(percent)),
        None => base,
    }
}
