use chrono::{DateTime, Local};

pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Wall-clock time of a view update, for the status line.
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format(CLOCK_FORMAT).to_string()
}
