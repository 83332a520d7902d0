//! Single-file frame read/write, dispatched on extension.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;

/// Read a CSV or Parquet file into a DataFrame.
pub fn read_frame(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match extension.as_str() {
        "parquet" => {
            let reader = ParquetReader::new(&mut file);
            reader.finish().context("reading Parquet file")
        }
        "csv" => {
            let reader = CsvReader::new(&mut file);
            reader.has_header(true).finish().context("reading CSV file")
        }
        _ => Err(anyhow!(
            "unsupported file extension '{}'; use .csv or .parquet",
            extension
        )),
    }
}

/// Write a DataFrame to a CSV or Parquet file, creating parent directories.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
    {
        Some(ext) if ext == "parquet" => ParquetWriter::new(&mut file)
            .finish(df)
            .map(|_| ())
            .context("writing Parquet file"),
        Some(ext) if ext == "csv" => CsvWriter::new(&mut file)
            .finish(df)
            .context("writing CSV file"),
        _ => Err(anyhow!(
            "unsupported output extension for {}; use .csv or .parquet",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_and_parquet_round_trip() {
        let dir = tempdir().unwrap();
        let df = df![
            "region" => &["AEP", "DOM"],
            "load_mw" => &[13478.0, 9842.5],
        ]
        .unwrap();

        for name in ["frame.csv", "frame.parquet"] {
            let path = dir.path().join(name);
            let mut out = df.clone();
            write_frame(&mut out, &path).unwrap();
            let back = read_frame(&path).unwrap();
            assert_eq!(back.height(), 2);
            assert_eq!(back.get_column_names(), df.get_column_names());
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.json");
        let mut df = df!["a" => &[1i64]].unwrap();
        assert!(write_frame(&mut df, &path).is_err());
    }
}
