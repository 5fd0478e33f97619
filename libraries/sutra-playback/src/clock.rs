//! Elapsed/total time display

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Convert a raw media clock reading into a known duration
///
/// Media elements report `NaN` before metadata loads and `Infinity` for
/// unbounded streams; both, zero and negative readings are unknown.
pub fn known_duration(seconds: f64) -> Option<Duration> {
    if seconds.is_finite() && seconds > 0.0 {
        Some(Duration::from_secs_f64(seconds))
    } else {
        None
    }
}

/// Format seconds as `m:ss`
///
/// Minutes are not wrapped into hours. Unknown readings render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// What the time labels and seek bar should show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDisplay {
    /// Elapsed time (`m:ss`)
    pub elapsed: String,

    /// Total time (`m:ss`, `0:00` while unknown)
    pub total: String,

    /// Seek bar position in [0, 1]; `None` leaves the bar untouched
    pub fraction: Option<f64>,
}

impl ProgressDisplay {
    /// Compute the display for a position within an optional duration
    pub fn new(position: Duration, duration: Option<Duration>) -> Self {
        let fraction = duration.map(|total| {
            let ratio = position.as_secs_f64() / total.as_secs_f64();
            ratio.clamp(0.0, 1.0)
        });

        Self {
            elapsed: format_clock(position.as_secs_f64()),
            total: format_clock(duration.map_or(0.0, |d| d.as_secs_f64())),
            fraction,
        }
    }

    /// Display before anything is loaded
    pub fn empty() -> Self {
        Self::new(Duration::ZERO, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(5.0), "0:05");
        assert_eq!(format_clock(65.9), "1:05");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(3600.0), "60:00");
    }

    #[test]
    fn unknown_readings_render_zero() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn known_duration_guards() {
        assert_eq!(known_duration(120.5), Some(Duration::from_secs_f64(120.5)));
        assert_eq!(known_duration(0.0), None);
        assert_eq!(known_duration(-1.0), None);
        assert_eq!(known_duration(f64::NAN), None);
        assert_eq!(known_duration(f64::INFINITY), None);
    }

    #[test]
    fn progress_with_known_duration() {
        let display = ProgressDisplay::new(Duration::from_secs(30), Some(Duration::from_secs(120)));
        assert_eq!(display.elapsed, "0:30");
        assert_eq!(display.total, "2:00");
        assert_eq!(display.fraction, Some(0.25));
    }

    #[test]
    fn progress_without_duration_leaves_bar_alone() {
        let display = ProgressDisplay::new(Duration::from_secs(3), None);
        assert_eq!(display.elapsed, "0:03");
        assert_eq!(display.total, "0:00");
        assert_eq!(display.fraction, None);
    }

    #[test]
    fn progress_fraction_is_clamped() {
        let display =
            ProgressDisplay::new(Duration::from_secs(200), Some(Duration::from_secs(100)));
        assert_eq!(display.fraction, Some(1.0));
    }
}
