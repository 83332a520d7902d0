//! Calendar & holiday enrichment.

use anyhow::{Context, Result};
use polars::prelude::*;

use loadcast_core::time;
use loadcast_core::LoadcastError;

use crate::columns::{column_i32_filled, column_i64};

/// Extend each grid row with date, holiday membership, day-of-week, weekend
/// flag, and the year/month partition columns.
///
/// The holiday join is many-to-one (many hourly rows per calendar date) and
/// must not change the row count; a multiplied result means the holiday table
/// was not deduplicated by date and the run aborts.
pub fn enrich_calendar(frame: DataFrame, holidays: Option<&DataFrame>) -> Result<DataFrame> {
    let timestamps = column_i64(&frame, "timestamp")?;
    let dates: Vec<i32> = timestamps.iter().map(|&ts| time::day_of(ts)).collect();

    let mut df = frame;
    df.with_column(Series::new("date", dates))
        .context("deriving date column")?;

    let mut df = match holidays {
        Some(holiday_df) => {
            let before = df.height();
            let joined = df
                .left_join(holiday_df, &["date"], &["date"])
                .context("joining holiday calendar")?;
            if joined.height() != before {
                return Err(LoadcastError::JoinCardinality(format!(
                    "holiday join changed row count from {} to {}; holiday table is not deduplicated by date",
                    before,
                    joined.height()
                ))
                .into());
            }
            let flags = column_i32_filled(&joined, "is_holiday", 0)?;
            let mut joined = joined;
            joined
                .with_column(Series::new("is_holiday", flags))
                .context("defaulting unmatched holiday rows")?;
            joined
        }
        None => {
            df.with_column(Series::new("is_holiday", vec![0i32; df.height()]))
                .context("adding holiday default column")?;
            df
        }
    };

    let timestamps = column_i64(&df, "timestamp")?;
    let mut day_of_week = Vec::with_capacity(timestamps.len());
    let mut is_weekend = Vec::with_capacity(timestamps.len());
    let mut years = Vec::with_capacity(timestamps.len());
    let mut months = Vec::with_capacity(timestamps.len());
    for &ts in &timestamps {
        let dow = time::day_of_week(ts)?;
        day_of_week.push(dow);
        is_weekend.push(if time::is_weekend(dow) { 1i32 } else { 0i32 });
        let (year, month) = time::year_month(ts)?;
        years.push(year);
        months.push(month);
    }
    df.with_column(Series::new("day_of_week", day_of_week))?;
    df.with_column(Series::new("is_weekend", is_weekend))?;
    df.with_column(Series::new("year", years))?;
    df.with_column(Series::new("month", months))?;
    Ok(df)
}
