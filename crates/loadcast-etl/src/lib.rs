//! Feature-engineering pipeline for hourly electricity load.
//!
//! The pipeline turns irregular, multi-source, multi-region load series into a
//! complete hourly feature grid: union of per-region sources, gap-free time
//! grid, calendar/holiday enrichment, per-region lag and rolling-window
//! features, and a partitioned Parquet feature dataset.
//!
//! Every stage is a pure `DataFrame -> Result<DataFrame>` function; the
//! [`pipeline::FeaturePipeline`] object composes them from a declarative
//! configuration. There is no global pipeline state.

pub mod calendar;
mod columns;
pub mod config;
pub mod grid;
pub mod pipeline;
pub mod project;
pub mod union;
pub mod window;

pub use config::{OutputSpec, PipelineConfig};
pub use pipeline::{FeaturePipeline, RunSummary};
