// Display formatting helpers
use chrono::{DateTime, Local};

/// Zero-padded 24-hour `HH:mm:ss` in the local time zone.
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Fraction of the chart height a bar fills, clamped to `[0, 1]`.
pub fn bar_fraction(value: f64, floor: f64, ceiling: f64) -> f64 {
    ((value - floor) / (ceiling - floor)).clamp(0.0, 1.0)
}

/// Big readout: one decimal, `--` when there is no reading yet.
pub fn format_readout(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, unit),
        None => format!("--{}", unit),
    }
}

/// Stat card value. Zero doubles as the "no data" marker for the average.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.1}", v),
        _ => "--".to_string(),
    }
}

pub fn format_history_value(value: f64, unit: &str) -> String {
    format!("{:.2}{}", value, unit)
}
