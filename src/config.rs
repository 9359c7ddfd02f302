/// Tracker configuration
use crate::site_time::SITE_TIME_KEY;

/// Name of the recurring sampling alarm
pub const TRACK_TIME_ALARM: &str = "trackTime";

/// Sampling period: 5 seconds, expressed the way chrome.alarms wants it
pub const TRACK_TIME_PERIOD_MINUTES: f64 = 1.0 / 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub alarm_name: String,
    pub period_minutes: f64,
    pub storage_key: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            alarm_name: TRACK_TIME_ALARM.to_string(),
            period_minutes: TRACK_TIME_PERIOD_MINUTES,
            storage_key: SITE_TIME_KEY.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn period_secs(&self) -> f64 {
        self.period_minutes * 60.0
    }
}
