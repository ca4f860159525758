//! Human-readable byte sizes and durations for progress reports.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Truncates (not rounds) to two decimal places.
#[must_use]
pub fn truncate_2dp(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Formats a byte count with a decimal unit suffix: `512b`, `1.5kb`, `2.34gb`.
#[must_use]
pub fn human_size(bytes: f64) -> String {
    let (value, unit) = if bytes < 1e3 {
        (bytes, "b")
    } else if bytes < 1e6 {
        (bytes / 1e3, "kb")
    } else if bytes < 1e9 {
        (bytes / 1e6, "mb")
    } else if bytes < 1e12 {
        (bytes / 1e9, "gb")
    } else {
        (bytes / 1e12, "tb")
    };
    format!("{}{unit}", truncate_2dp(value))
}

/// Formats a duration in seconds as `"1 hour 2 minutes 5 seconds"`.
///
/// Fractional seconds are dropped and zero components are omitted. Anything
/// under one second is `"0 seconds"`. Non-finite or negative input means the
/// estimate is not known yet and renders as `"unknown"`.
#[must_use]
pub fn human_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "unknown".to_owned();
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "finite, non-negative, whole seconds"
    )]
    let mut rest = seconds.floor() as u64;

    let mut parts = Vec::new();
    for (unit, name) in [
        (YEAR, "year"),
        (MONTH, "month"),
        (DAY, "day"),
        (HOUR, "hour"),
        (MINUTE, "minute"),
    ] {
        let count = rest / unit;
        rest %= unit;
        if count > 0 {
            parts.push(plural(count, name));
        }
    }
    if rest > 0 || parts.is_empty() {
        parts.push(plural(rest, "second"));
    }
    parts.join(" ")
}

fn plural(count: u64, name: &str) -> String {
    if count == 1 {
        format!("{count} {name}")
    } else {
        format!("{count} {name}s")
    }
}
