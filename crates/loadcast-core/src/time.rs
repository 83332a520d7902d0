//! Epoch-second time helpers.
//!
//! Timestamps travel through the pipeline as naive-UTC epoch seconds in an
//! `Int64` column named `timestamp`, at hour granularity. Calendar math lives
//! here so every stage shares one set of conventions.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::LoadcastError;

pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Accepted datetime layouts for source CSVs, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Accepted date layouts for holiday CSVs, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Parse a source datetime string into epoch seconds (naive UTC).
///
/// Date-only values parse as midnight. Unparseable input is a schema error:
/// it means the configured timestamp column does not hold timestamps.
pub fn parse_timestamp(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.and_utc().timestamp());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(days_since_epoch(date) as i64 * SECONDS_PER_DAY);
        }
    }
    Err(LoadcastError::Schema(format!("unparseable timestamp '{trimmed}'")).into())
}

/// Parse a calendar date string into days since the Unix epoch.
pub fn parse_date(raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(days_since_epoch(date));
        }
    }
    // Holiday exports sometimes carry a full datetime in the date column.
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(days_since_epoch(dt.date()));
        }
    }
    Err(LoadcastError::Schema(format!("unparseable date '{trimmed}'")).into())
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date");
    date.signed_duration_since(epoch).num_days() as i32
}

fn datetime_of(ts: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.naive_utc())
        .with_context(|| format!("timestamp {ts} out of range"))
}

/// Every hourly timestamp in `[min_ts, max_ts]` inclusive.
pub fn hourly_range(min_ts: i64, max_ts: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let mut ts = min_ts;
    while ts <= max_ts {
        out.push(ts);
        ts += SECONDS_PER_HOUR;
    }
    out
}

/// Calendar-day truncation of an hourly timestamp, as days since epoch.
pub fn day_of(ts: i64) -> i32 {
    ts.div_euclid(SECONDS_PER_DAY) as i32
}

/// Day of week, numbered 1 = Sunday through 7 = Saturday.
///
/// This is the pipeline's fixed convention: the weekend predicate below treats
/// 1 and 7 as weekend days. Any consumer of `day_of_week` must use this
/// numbering, not ISO weekday numbers.
pub fn day_of_week(ts: i64) -> Result<i32> {
    let dt = datetime_of(ts)?;
    Ok(dt.weekday().num_days_from_sunday() as i32 + 1)
}

/// Weekend predicate over the 1 = Sunday … 7 = Saturday numbering.
pub fn is_weekend(day_of_week: i32) -> bool {
    day_of_week == 1 || day_of_week == 7
}

/// Calendar (year, month) of an hourly timestamp.
pub fn year_month(ts: i64) -> Result<(i32, i32)> {
    let dt = datetime_of(ts)?;
    Ok((dt.year(), dt.month() as i32))
}
