use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_MIN: i64 = 60;
    pub const SECS_IN_5_MIN: i64 = Self::SECS_IN_MIN * 5;
    pub const SECS_IN_15_MIN: i64 = Self::SECS_IN_MIN * 15;
    pub const SECS_IN_H: i64 = Self::SECS_IN_MIN * 60;
    pub const SECS_IN_4_H: i64 = Self::SECS_IN_H * 4;
    pub const SECS_IN_D: i64 = Self::SECS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Convert a bar interval in seconds to the usual shorthand (e.g. `5m`, `1h`).
    pub fn interval_to_string(interval_secs: i64) -> &'static str {
        match interval_secs {
            Self::SECS_IN_MIN => "1m",
            Self::SECS_IN_5_MIN => "5m",
            Self::SECS_IN_15_MIN => "15m",
            Self::SECS_IN_H => "1h",
            Self::SECS_IN_4_H => "4h",
            Self::SECS_IN_D => "1d",
            _ => "unknown",
        }
    }
}

// Time helper functions

pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    // Used for display purposes (warnings, log lines)
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => format!("{}", dt.format(TimeUtils::STANDARD_TIME_FORMAT)),
        None => format!("<invalid ts {}>", epoch_sec),
    }
}

pub fn format_duration(secs: i64) -> String {
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    format!("{}d", days)
}
