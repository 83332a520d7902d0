//! CSV source readers.
//!
//! Three source shapes feed the pipeline: per-region load files, weather
//! files, and holiday calendars. Load files are normalized into the long
//! ObservedRecord layout `(region, timestamp, load_mw)`; weather and holiday
//! files get best-effort schema sniffing over a small candidate column set.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Deserialize;

use loadcast_core::time;
use loadcast_core::LoadcastError;

/// One load source: a CSV file carrying a single region's hourly series.
///
/// Column names are optional. When given they are validated eagerly against
/// the header; when absent the reader falls back to the positional contract
/// (first column = timestamp, second = load).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    pub path: String,
    pub region: String,
    #[serde(default)]
    pub timestamp_column: Option<String>,
    #[serde(default)]
    pub value_column: Option<String>,
}

/// Holiday calendar source.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaySpec {
    pub path: String,
    #[serde(default)]
    pub date_column: Option<String>,
}

/// Timestamp-like column candidates for weather files, tried in order.
const WEATHER_TIMESTAMP_CANDIDATES: &[&str] = &["datetime", "Datetime", "date_time", "timestamp"];

/// Date column candidates for holiday files, tried in order.
const HOLIDAY_DATE_CANDIDATES: &[&str] = &["Date", "date", "ds"];

/// Read one region's load CSV into the ObservedRecord layout.
///
/// Output columns: `region` (Utf8), `timestamp` (Int64 epoch seconds),
/// `load_mw` (Float64, nulls preserved for the grid join to fill).
pub fn read_load_csv(spec: &SourceSpec) -> Result<DataFrame> {
    if spec.region.trim().is_empty() {
        return Err(LoadcastError::Schema(format!(
            "source '{}' has an empty region label",
            spec.path
        ))
        .into());
    }

    let df = read_csv(Path::new(&spec.path))?;
    let cols = df.get_column_names();

    let ts_name = resolve_column(&spec.path, &cols, spec.timestamp_column.as_deref(), 0)?;
    let val_name = resolve_column(&spec.path, &cols, spec.value_column.as_deref(), 1)?;

    let timestamps = timestamp_seconds(&spec.path, df.column(&ts_name)?)?;
    let loads = load_values(&spec.path, df.column(&val_name)?)?;
    let regions = vec![spec.region.clone(); df.height()];

    DataFrame::new(vec![
        Series::new("region", regions),
        Series::new("timestamp", timestamps),
        Series::new("load_mw", loads),
    ])
    .with_context(|| format!("assembling observed frame for region '{}'", spec.region))
}

/// Read a weather CSV, normalizing its timestamp column.
///
/// The timestamp-like column is detected by name from a small candidate set;
/// a file with none of them is a lookup failure, not a silent pass-through.
/// Remaining columns are kept as read.
pub fn read_weather_csv(path: &Path) -> Result<DataFrame> {
    let df = read_csv(path)?;
    let cols = df.get_column_names();
    let found = WEATHER_TIMESTAMP_CANDIDATES
        .iter()
        .find(|cand| cols.iter().any(|c| c == *cand))
        .copied()
        .ok_or_else(|| {
            LoadcastError::Lookup(format!(
                "no timestamp-like column in '{}'; expected one of {}",
                path.display(),
                WEATHER_TIMESTAMP_CANDIDATES.join("/")
            ))
        })?;

    let source = path.display().to_string();
    let timestamps = timestamp_seconds(&source, df.column(found)?)?;
    let mut out = df.drop(found)?;
    out.with_column(Series::new("timestamp", timestamps))
        .with_context(|| format!("normalizing timestamp column of '{}'", path.display()))?;
    Ok(out)
}

/// Read a holiday CSV into the HolidayRecord layout, deduplicated by date.
///
/// Output columns: `date` (Int32 days since epoch), `is_holiday` (Int32, 1).
pub fn read_holiday_csv(path: &Path, date_column: Option<&str>) -> Result<DataFrame> {
    let df = read_csv(path)?;
    let cols = df.get_column_names();

    let found = match date_column {
        Some(name) => {
            if !cols.iter().any(|c| *c == name) {
                return Err(LoadcastError::Lookup(format!(
                    "configured date column '{}' not found in '{}'",
                    name,
                    path.display()
                ))
                .into());
            }
            name
        }
        None => HOLIDAY_DATE_CANDIDATES
            .iter()
            .find(|cand| cols.iter().any(|c| c == *cand))
            .copied()
            .ok_or_else(|| {
                LoadcastError::Lookup(format!(
                    "no date column in '{}'; expected one of {}",
                    path.display(),
                    HOLIDAY_DATE_CANDIDATES.join("/")
                ))
            })?,
    };

    let raw = df
        .column(found)?
        .cast(&DataType::Utf8)
        .with_context(|| format!("reading date column '{found}' as text"))?;
    let ca = raw.utf8()?;

    let mut seen = std::collections::BTreeSet::new();
    for (row, opt) in ca.into_iter().enumerate() {
        let value = opt.ok_or_else(|| {
            LoadcastError::Schema(format!(
                "null date at row {row} of '{}'",
                path.display()
            ))
        })?;
        seen.insert(time::parse_date(value)?);
    }

    let dates: Vec<i32> = seen.into_iter().collect();
    let flags = vec![1i32; dates.len()];
    DataFrame::new(vec![
        Series::new("date", dates),
        Series::new("is_holiday", flags),
    ])
    .context("assembling holiday frame")
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    let mut file =
        File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = CsvReader::new(&mut file);
    reader
        .has_header(true)
        .finish()
        .with_context(|| format!("reading CSV file {}", path.display()))
}

/// Resolve a column: explicit names are validated against the header, absent
/// names fall back to the positional contract.
fn resolve_column(
    source: &str,
    cols: &[&str],
    explicit: Option<&str>,
    position: usize,
) -> Result<String> {
    match explicit {
        Some(name) => {
            if cols.iter().any(|c| *c == name) {
                Ok(name.to_string())
            } else {
                Err(LoadcastError::Lookup(format!(
                    "configured column '{name}' not found in '{source}'"
                ))
                .into())
            }
        }
        None => {
            if cols.len() < 2 {
                return Err(LoadcastError::Schema(format!(
                    "'{source}': expected at least 2 columns, got {}",
                    cols.len()
                ))
                .into());
            }
            Ok(cols[position].to_string())
        }
    }
}

/// Extract a timestamp column as epoch seconds, whatever its source dtype.
fn timestamp_seconds(source: &str, series: &Series) -> Result<Vec<i64>> {
    match series.dtype() {
        DataType::Utf8 => {
            let ca = series.utf8()?;
            ca.into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    let raw = opt.ok_or_else(|| {
                        LoadcastError::Schema(format!("null timestamp at row {row} of '{source}'"))
                    })?;
                    time::parse_timestamp(raw)
                })
                .collect()
        }
        _ => {
            // Numeric timestamp columns are taken as epoch seconds.
            let casted = series
                .cast(&DataType::Int64)
                .with_context(|| format!("casting timestamp column of '{source}' to Int64"))?;
            let ca = casted.i64()?;
            ca.into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    opt.ok_or_else(|| {
                        LoadcastError::Schema(format!("null timestamp at row {row} of '{source}'"))
                            .into()
                    })
                })
                .collect()
        }
    }
}

/// Extract the load column as Float64, preserving nulls.
fn load_values(source: &str, series: &Series) -> Result<Vec<Option<f64>>> {
    let casted = series
        .cast(&DataType::Float64)
        .with_context(|| format!("casting load column of '{source}' to Float64"))?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn spec(path: &Path, region: &str) -> SourceSpec {
        SourceSpec {
            path: path.to_str().unwrap().to_string(),
            region: region.to_string(),
            timestamp_column: None,
            value_column: None,
        }
    }

    #[test]
    fn reads_positional_load_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aep.csv");
        fs::write(
            &path,
            "Datetime,AEP_MW\n2004-12-31 01:00:00,13478.0\n2004-12-31 02:00:00,12865.0\n",
        )
        .unwrap();

        let df = read_load_csv(&spec(&path, "AEP")).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names(), &["region", "timestamp", "load_mw"]);
        let loads = df.column("load_mw").unwrap().f64().unwrap();
        assert_eq!(loads.get(0), Some(13478.0));
        let ts = df.column("timestamp").unwrap().i64().unwrap();
        assert_eq!(ts.get(1).unwrap() - ts.get(0).unwrap(), 3_600);
    }

    #[test]
    fn single_column_file_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Datetime\n2004-12-31 01:00:00\n").unwrap();

        let err = read_load_csv(&spec(&path, "AEP")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadcastError>(),
            Some(LoadcastError::Schema(_))
        ));
    }

    #[test]
    fn explicit_columns_validated_eagerly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dom.csv");
        fs::write(&path, "ts,mw\n2004-12-31 01:00:00,100.0\n").unwrap();

        let mut s = spec(&path, "DOM");
        s.timestamp_column = Some("no_such_column".to_string());
        let err = read_load_csv(&s).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadcastError>(),
            Some(LoadcastError::Lookup(_))
        ));

        let mut s = spec(&path, "DOM");
        s.timestamp_column = Some("ts".to_string());
        s.value_column = Some("mw".to_string());
        let df = read_load_csv(&s).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn weather_sniffs_datetime_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("temperature.csv");
        fs::write(
            &path,
            "datetime,Vancouver,Portland\n2012-10-01 13:00:00,284.6,282.1\n",
        )
        .unwrap();

        let df = read_weather_csv(&path).unwrap();
        assert!(df.get_column_names().contains(&"timestamp"));
        assert!(!df.get_column_names().contains(&"datetime"));
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn weather_without_timestamp_column_is_lookup_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("humidity.csv");
        fs::write(&path, "when,Vancouver\n2012-10-01 13:00:00,76.0\n").unwrap();

        let err = read_weather_csv(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadcastError>(),
            Some(LoadcastError::Lookup(_))
        ));
    }

    #[test]
    fn holidays_deduplicate_by_date() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("holidays.csv");
        fs::write(
            &path,
            "Date,Holiday\n2012-07-04,Independence Day\n2012-07-04,Independence Day (observed)\n2012-12-25,Christmas\n",
        )
        .unwrap();

        let df = read_holiday_csv(&path, None).unwrap();
        assert_eq!(df.height(), 2);
        let flags = df.column("is_holiday").unwrap().i32().unwrap();
        assert!(flags.into_iter().all(|v| v == Some(1)));
    }

    #[test]
    fn holiday_candidate_lookup_fails_loudly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("holidays.csv");
        fs::write(&path, "day,name\n2012-07-04,Independence Day\n").unwrap();

        let err = read_holiday_csv(&path, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadcastError>(),
            Some(LoadcastError::Lookup(_))
        ));

        // explicit override accepts the nonstandard name
        let df = read_holiday_csv(&path, Some("day")).unwrap();
        assert_eq!(df.height(), 1);
    }
}
