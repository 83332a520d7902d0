//! Explicit pipeline composition.
//!
//! Stages are pure functions over frames; this object owns only the
//! configuration and runs them in order:
//! readers -> union -> grid -> enricher -> window engine -> projector ->
//! partitioned write. One run is one full rebuild of the output root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use loadcast_io::{
    read_holiday_csv, read_load_csv, read_weather_csv, write_partitioned_parquet,
};

use crate::calendar::enrich_calendar;
use crate::columns::column_str;
use crate::config::PipelineConfig;
use crate::grid::build_time_grid;
use crate::project::project_features;
use crate::union::union_observations;
use crate::window::window_features;

/// Counts reported after a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub regions: usize,
    pub hours: usize,
    pub rows: usize,
    pub weather_rows: usize,
    pub output_root: PathBuf,
}

pub struct FeaturePipeline {
    config: PipelineConfig,
}

impl FeaturePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn from_config_path(path: &Path) -> Result<Self> {
        Ok(Self::new(PipelineConfig::load(path)?))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full feature build and overwrite the output root.
    pub fn run(&self) -> Result<RunSummary> {
        let mut sources = Vec::with_capacity(self.config.sources.len());
        for spec in &self.config.sources {
            let frame = read_load_csv(spec)
                .with_context(|| format!("reading load source '{}'", spec.path))?;
            sources.push(frame);
        }

        // Weather files are ingested so schema problems fail the run, even
        // though their columns are not yet part of the feature set.
        let mut weather_rows = 0;
        for path in &self.config.weather {
            let frame = read_weather_csv(Path::new(path))
                .with_context(|| format!("reading weather source '{path}'"))?;
            weather_rows += frame.height();
        }

        let holidays = match &self.config.holidays {
            Some(spec) => Some(
                read_holiday_csv(Path::new(&spec.path), spec.date_column.as_deref())
                    .with_context(|| format!("reading holiday source '{}'", spec.path))?,
            ),
            None => None,
        };

        let observed = union_observations(&sources)?;
        let grid = build_time_grid(&observed)?;
        let enriched = enrich_calendar(grid, holidays.as_ref())?;
        let windowed = window_features(enriched)?;
        let mut features = project_features(&windowed)?;

        let regions = distinct_regions(&features)?;
        let rows = features.height();
        let hours = if regions == 0 { 0 } else { rows / regions };

        let output_root = PathBuf::from(&self.config.output.path);
        write_partitioned_parquet(&mut features, &output_root, &self.config.output.partitions)
            .context("writing partitioned feature dataset")?;

        Ok(RunSummary {
            regions,
            hours,
            rows,
            weather_rows,
            output_root,
        })
    }
}

fn distinct_regions(frame: &DataFrame) -> Result<usize> {
    let regions: BTreeSet<String> = column_str(frame, "region")?.into_iter().collect();
    Ok(regions.len())
}
