use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::info;

use loadcast_core::LoadcastError;
use loadcast_io::read_frame;
use loadcast_train::{chronological_split, prepare_sequences, TrainingArtifact};

use crate::cli::PrepareArgs;

pub fn handle(args: &PrepareArgs) -> Result<()> {
    let df = read_frame(Path::new(&args.input))
        .with_context(|| format!("reading feature table '{}'", args.input))?;
    let series = extract_series(&df, &args.column, args.region.as_deref())?;
    info!(
        "loaded {} values of '{}' from {}",
        series.len(),
        args.column,
        args.input
    );

    let prepared = prepare_sequences(&series, args.seq_len)?;
    let pairs = prepared.x.shape()[0];
    info!(
        "prepared sequences: X=({pairs}, {}, 1), y=({pairs}, 1)",
        args.seq_len
    );

    let split = chronological_split(&prepared.x, &prepared.y, args.train_fraction)?;
    info!(
        "chronological split: {} training pairs, {} validation pairs",
        split.x_train.shape()[0],
        split.x_val.shape()[0]
    );

    if let Some(path) = &args.artifact_out {
        let artifact = TrainingArtifact {
            seq_len: args.seq_len,
            train_fraction: args.train_fraction,
            scaler: prepared.scaler.clone(),
        };
        artifact.save(Path::new(path))?;
        info!("wrote training artifact to {path}");
    }
    Ok(())
}

/// Pull the target column as a chronologically ordered series.
///
/// Rows are optionally restricted to one region; when the input carries a
/// `timestamp` column the values are ordered by it, otherwise row order is
/// taken as chronological.
fn extract_series(df: &DataFrame, column: &str, region: Option<&str>) -> Result<Vec<f64>> {
    let target = df
        .column(column)
        .with_context(|| format!("feature table has no column '{column}'"))?
        .cast(&DataType::Float64)
        .with_context(|| format!("casting column '{column}' to Float64"))?;
    let values = target.f64()?;

    let mut keep: Vec<usize> = match region {
        Some(want) => {
            let regions = df
                .column("region")
                .context("--region given but the input has no region column")?
                .utf8()
                .context("region column must be utf8")?;
            (0..df.height())
                .filter(|&row| regions.get(row) == Some(want))
                .collect()
        }
        None => (0..df.height()).collect(),
    };
    if keep.is_empty() {
        return Err(LoadcastError::InsufficientData(format!(
            "no rows selected from '{column}'{}",
            region.map(|r| format!(" for region '{r}'")).unwrap_or_default()
        ))
        .into());
    }

    if let Ok(ts_col) = df.column("timestamp") {
        let timestamps = ts_col.i64().context("timestamp column must be Int64")?;
        keep.sort_by_key(|&row| timestamps.get(row));
    }

    keep.iter()
        .map(|&row| {
            values.get(row).ok_or_else(|| {
                LoadcastError::Schema(format!("null value at row {row} of column '{column}'"))
                    .into()
            })
        })
        .collect()
}
