//! Gap-free hourly time grid.
//!
//! Irregular sampling is eliminated here: every region present in the
//! observed frame receives one row per hour over the global [min, max]
//! timestamp range, with observed load joined on and gaps filled with 0.0.
//!
//! The 0.0 fill is a modeling assumption — absence of reported load is
//! treated as zero load — and is indistinguishable from genuine zero load in
//! the output. Downstream consumers must be told, which is why it is fixed
//! here and nowhere else.

use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use polars::prelude::*;

use loadcast_core::time;
use loadcast_core::LoadcastError;

use crate::columns::{column_f64_opt, column_str};

pub const GAP_FILL_LOAD_MW: f64 = 0.0;

/// Build the complete (region × hour) grid and left-join observed load.
///
/// Expects the unioned frame from [`crate::union::union_observations`], whose
/// (region, timestamp) keys are unique. A region with at least one observed
/// row gets full grid coverage; a region absent from the observed frame
/// cannot appear at all.
pub fn build_time_grid(observed: &DataFrame) -> Result<DataFrame> {
    let ts_col = observed
        .column("timestamp")?
        .i64()
        .context("observed timestamp column must be Int64")?;
    let (min_ts, max_ts) = match (ts_col.min(), ts_col.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(LoadcastError::Schema(
                "cannot build a time grid from an empty observed table".to_string(),
            )
            .into())
        }
    };

    let hours = time::hourly_range(min_ts, max_ts);
    let regions: BTreeSet<String> = column_str(observed, "region")?.into_iter().collect();

    let mut grid_regions = Vec::with_capacity(regions.len() * hours.len());
    let mut grid_hours = Vec::with_capacity(regions.len() * hours.len());
    for region in &regions {
        for &hour in &hours {
            grid_regions.push(region.clone());
            grid_hours.push(hour);
        }
    }

    let grid = DataFrame::new(vec![
        Series::new("region", grid_regions),
        Series::new("timestamp", grid_hours),
    ])
    .context("assembling hourly grid")?;

    let joined = grid
        .left_join(observed, &["region", "timestamp"], &["region", "timestamp"])
        .context("joining observed load onto the hourly grid")?;

    // Observed keys are unique after the union step, so the left join cannot
    // multiply rows; a mismatch here means that invariant broke upstream.
    let expected = regions.len() * hours.len();
    if joined.height() != expected {
        bail!(
            "grid join produced {} rows, expected {} ({} regions x {} hours); observed keys are not unique",
            joined.height(),
            expected,
            regions.len(),
            hours.len()
        );
    }

    let filled: Vec<f64> = column_f64_opt(&joined, "load_mw")?
        .into_iter()
        .map(|opt| opt.unwrap_or(GAP_FILL_LOAD_MW))
        .collect();
    let mut out = joined;
    out.with_column(Series::new("load_mw", filled))
        .context("filling load gaps")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn observed(rows: &[(&str, i64, f64)]) -> DataFrame {
        let regions: Vec<String> = rows.iter().map(|(r, _, _)| r.to_string()).collect();
        let timestamps: Vec<i64> = rows.iter().map(|(_, ts, _)| *ts).collect();
        let loads: Vec<f64> = rows.iter().map(|(_, _, l)| *l).collect();
        DataFrame::new(vec![
            Series::new("region", regions),
            Series::new("timestamp", timestamps),
            Series::new("load_mw", loads),
        ])
        .unwrap()
    }

    #[test]
    fn grid_is_complete_and_gap_free() {
        // AEP observed at hours 0 and 3; DOM only at hour 1.
        let observed = observed(&[
            ("AEP", 0, 10.0),
            ("AEP", 3 * 3_600, 13.0),
            ("DOM", 3_600, 21.0),
        ]);
        let grid = build_time_grid(&observed).unwrap();

        // 2 regions x 4 hours, one row per pair, no duplicates.
        assert_eq!(grid.height(), 8);
        let regions = grid.column("region").unwrap().utf8().unwrap();
        let timestamps = grid.column("timestamp").unwrap().i64().unwrap();
        let mut keys = BTreeSet::new();
        for row in 0..grid.height() {
            keys.insert((
                regions.get(row).unwrap().to_string(),
                timestamps.get(row).unwrap(),
            ));
        }
        assert_eq!(keys.len(), 8);
        for region in ["AEP", "DOM"] {
            for hour in 0..4i64 {
                assert!(keys.contains(&(region.to_string(), hour * 3_600)));
            }
        }
    }

    #[test]
    fn gaps_fill_with_zero_and_observations_survive() {
        let observed = observed(&[("AEP", 0, 10.0), ("AEP", 2 * 3_600, 12.0)]);
        let grid = build_time_grid(&observed).unwrap();
        assert_eq!(grid.height(), 3);

        let timestamps = grid.column("timestamp").unwrap().i64().unwrap();
        let loads = grid.column("load_mw").unwrap().f64().unwrap();
        for row in 0..grid.height() {
            let expected = match timestamps.get(row).unwrap() {
                0 => 10.0,
                7_200 => 12.0,
                _ => GAP_FILL_LOAD_MW,
            };
            assert_eq!(loads.get(row), Some(expected));
        }
    }

    #[test]
    fn empty_observed_table_is_schema_error() {
        let observed = DataFrame::new(vec![
            Series::new("region", Vec::<String>::new()),
            Series::new("timestamp", Vec::<i64>::new()),
            Series::new("load_mw", Vec::<f64>::new()),
        ])
        .unwrap();
        let err = build_time_grid(&observed).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadcastError>(),
            Some(LoadcastError::Schema(_))
        ));
    }
}
