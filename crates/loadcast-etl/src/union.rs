//! Union & normalization of per-region observed frames.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use polars::prelude::*;

use loadcast_core::LoadcastError;

use crate::columns::{column_f64_opt, column_i64, column_str};

/// Merge per-region ObservedRecord frames into one long-format frame.
///
/// Duplicate (region, timestamp) keys are collapsed keep-first so the later
/// grid join cannot multiply rows. The result is sorted by (region,
/// timestamp).
pub fn union_observations(frames: &[DataFrame]) -> Result<DataFrame> {
    if frames.is_empty() {
        return Err(LoadcastError::Schema("no load sources to union".to_string()).into());
    }

    let mut merged: BTreeMap<(String, i64), Option<f64>> = BTreeMap::new();
    for df in frames {
        let regions = column_str(df, "region")?;
        let timestamps = column_i64(df, "timestamp")?;
        let loads = column_f64_opt(df, "load_mw")?;
        for row in 0..df.height() {
            merged
                .entry((regions[row].clone(), timestamps[row]))
                .or_insert(loads[row]);
        }
    }

    let mut regions = Vec::with_capacity(merged.len());
    let mut timestamps = Vec::with_capacity(merged.len());
    let mut loads = Vec::with_capacity(merged.len());
    for ((region, ts), load) in merged {
        regions.push(region);
        timestamps.push(ts);
        loads.push(load);
    }

    DataFrame::new(vec![
        Series::new("region", regions),
        Series::new("timestamp", timestamps),
        Series::new("load_mw", loads),
    ])
    .context("assembling unioned observed frame")
}
