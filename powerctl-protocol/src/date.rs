//! Tibber timestamp helpers.
//!
//! The api sends ISO-8601 timestamps with millisecond precision and the local offset of the
//! home, e.g. `2024-01-15T13:00:00.000+01:00`. They deserialize natively into [`Timestamp`],
//! these helpers exist for rendering them back out.

use crate::Timestamp;
use chrono::{SecondsFormat, Utc};

const HOUR_FORMAT: &str = "%H:%M";

/// Format a timestamp the same way the api sends it.
pub fn to_api_string(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Hour and minute in the home's own offset, e.g. `13:00`.
pub fn hour_label(ts: &Timestamp) -> String {
    ts.format(HOUR_FORMAT).to_string()
}

/// True if the current instant falls within the hour starting at `ts`.
pub fn is_current_hour(ts: &Timestamp) -> bool {
    let now = Utc::now();
    let start = ts.with_timezone(&Utc);
    start <= now && now < start + chrono::Duration::hours(1)
}
