//! Per-region lag and rolling-window features.
//!
//! The ordering contract is hard correctness, not tuning: lag and rolling
//! operators are only valid when rows are partitioned by region and ordered
//! by timestamp within the partition. This stage index-sorts the frame by
//! (region, timestamp) and computes every statistic inside per-region runs,
//! so one region's values can never reach another's features.

use anyhow::{Context, Result};
use polars::prelude::*;

use loadcast_core::time;

use crate::columns::{column_f64, column_i64, column_str};

/// Trailing window length for the rolling mean, in hours.
pub const ROLLING_WINDOW_HOURS: usize = 24;

const LAG_1H: usize = 1;
const LAG_24H: usize = 24;
const LAG_7D: usize = 168;

/// Compute lag_1h / lag_24h / lag_7d and rolling_mean_24h.
///
/// Lags are null until k prior grid hours exist for the region. The rolling
/// mean covers the 24 hours strictly before the current one — the current
/// hour's load is never part of its own window — and is null until 24 prior
/// rows exist. Returns the frame sorted by (region, timestamp).
pub fn window_features(frame: DataFrame) -> Result<DataFrame> {
    let regions = column_str(&frame, "region")?;
    let timestamps = column_i64(&frame, "timestamp")?;
    let loads = column_f64(&frame, "load_mw")?;
    let n = frame.height();

    let mut order: Vec<IdxSize> = (0..n as IdxSize).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (a as usize, b as usize);
        regions[a]
            .cmp(&regions[b])
            .then(timestamps[a].cmp(&timestamps[b]))
    });

    let mut lag_1h = vec![None; n];
    let mut lag_24h = vec![None; n];
    let mut lag_7d = vec![None; n];
    let mut rolling_mean = vec![None; n];

    let mut run_start = 0usize;
    for pos in 0..n {
        let row = order[pos] as usize;
        if pos > 0 && regions[order[pos - 1] as usize] != regions[row] {
            run_start = pos;
        }
        let offset = pos - run_start;

        // Lag k is the value k rows back in the same region's run. On the
        // gap-free grid that is exactly t - k hours; on a frame with holes
        // the timestamp check leaves the lag null instead of mis-aligning.
        let lag_at = |k: usize| -> Option<f64> {
            if offset < k {
                return None;
            }
            let prior = order[pos - k] as usize;
            if timestamps[row] - timestamps[prior] == k as i64 * time::SECONDS_PER_HOUR {
                Some(loads[prior])
            } else {
                None
            }
        };
        lag_1h[pos] = lag_at(LAG_1H);
        lag_24h[pos] = lag_at(LAG_24H);
        lag_7d[pos] = lag_at(LAG_7D);

        if offset >= ROLLING_WINDOW_HOURS {
            let mut sum = 0.0;
            for prior_pos in (pos - ROLLING_WINDOW_HOURS)..pos {
                sum += loads[order[prior_pos] as usize];
            }
            rolling_mean[pos] = Some(sum / ROLLING_WINDOW_HOURS as f64);
        }
    }

    let idx = IdxCa::new("row_idx", order.as_slice());
    let mut sorted = frame
        .take(&idx)
        .context("sorting frame by (region, timestamp)")?;
    sorted.with_column(Series::new("lag_1h", lag_1h))?;
    sorted.with_column(Series::new("lag_24h", lag_24h))?;
    sorted.with_column(Series::new("lag_7d", lag_7d))?;
    sorted.with_column(Series::new("rolling_mean_24h", rolling_mean))?;
    Ok(sorted)
}
