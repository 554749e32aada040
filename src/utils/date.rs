//! Display formats for story timestamps (always in local time).

use chrono::{DateTime, Local, Utc};

pub const DATE_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn format_date_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DATE_TIME_FMT).to_string()
}

pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DATE_FMT).to_string()
}
