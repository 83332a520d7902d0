//! Column extraction helpers shared by the pipeline stages.

use anyhow::{Context, Result};
use polars::prelude::*;

use loadcast_core::LoadcastError;

/// A required Utf8 column as owned strings; nulls are a schema violation.
pub fn column_str(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let chunked = df
        .column(column)?
        .utf8()
        .with_context(|| format!("column '{column}' must be utf8"))?;
    chunked
        .into_iter()
        .enumerate()
        .map(|(row, opt)| {
            opt.map(|v| v.to_string()).ok_or_else(|| {
                LoadcastError::Schema(format!("null value at row {row} of column '{column}'"))
                    .into()
            })
        })
        .collect()
}

/// A required Int64 column; nulls are a schema violation.
pub fn column_i64(df: &DataFrame, column: &str) -> Result<Vec<i64>> {
    let chunked = df
        .column(column)?
        .i64()
        .with_context(|| format!("column '{column}' must be Int64"))?;
    chunked
        .into_iter()
        .enumerate()
        .map(|(row, opt)| {
            opt.ok_or_else(|| {
                LoadcastError::Schema(format!("null value at row {row} of column '{column}'"))
                    .into()
            })
        })
        .collect()
}

/// A required Float64 column; nulls are a schema violation.
pub fn column_f64(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let chunked = df
        .column(column)?
        .f64()
        .with_context(|| format!("column '{column}' must be Float64"))?;
    chunked
        .into_iter()
        .enumerate()
        .map(|(row, opt)| {
            opt.ok_or_else(|| {
                LoadcastError::Schema(format!("null value at row {row} of column '{column}'"))
                    .into()
            })
        })
        .collect()
}

/// A Float64 column with nulls preserved.
pub fn column_f64_opt(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let chunked = df
        .column(column)?
        .f64()
        .with_context(|| format!("column '{column}' must be Float64"))?;
    Ok(chunked.into_iter().collect())
}

/// An Int32 column with nulls mapped to a default.
pub fn column_i32_filled(df: &DataFrame, column: &str, default: i32) -> Result<Vec<i32>> {
    let chunked = df
        .column(column)?
        .i32()
        .with_context(|| format!("column '{column}' must be Int32"))?;
    Ok(chunked.into_iter().map(|opt| opt.unwrap_or(default)).collect())
}
