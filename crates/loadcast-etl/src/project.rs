//! Final column projection for the feature dataset.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Column set and order of the persisted feature dataset.
pub const FEATURE_COLUMNS: [&str; 12] = [
    "timestamp",
    "region",
    "load_mw",
    "is_holiday",
    "day_of_week",
    "is_weekend",
    "lag_1h",
    "lag_24h",
    "lag_7d",
    "rolling_mean_24h",
    "year",
    "month",
];

/// Select and order the final columns, dropping internal helpers (`date`).
pub fn project_features(frame: &DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(FEATURE_COLUMNS.len());
    for name in FEATURE_COLUMNS {
        let series = frame
            .column(name)
            .with_context(|| format!("final projection requires column '{name}'"))?;
        columns.push(series.clone());
    }
    DataFrame::new(columns).context("assembling feature dataset")
}
