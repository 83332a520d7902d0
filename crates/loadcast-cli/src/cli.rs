use clap::{Args, Parser, Subcommand};

use loadcast_train::{DEFAULT_SEQ_LEN, DEFAULT_TRAIN_FRACTION};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the hourly feature dataset from a pipeline config
    Etl {
        /// Path to the pipeline TOML config
        #[arg(long)]
        config: String,
    },
    /// Prepare scaled training sequences from a feature table
    Prepare(PrepareArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Feature table to read (.csv or .parquet)
    #[arg(long)]
    pub input: String,

    /// Target column to window
    #[arg(long, default_value = "load_mw")]
    pub column: String,

    /// Restrict to a single region before windowing
    #[arg(long)]
    pub region: Option<String>,

    /// Input window length in hours
    #[arg(long, default_value_t = DEFAULT_SEQ_LEN)]
    pub seq_len: usize,

    /// Fraction of pairs assigned to training (chronological split)
    #[arg(long, default_value_t = DEFAULT_TRAIN_FRACTION)]
    pub train_fraction: f64,

    /// Where to write the training artifact (scaler bounds)
    #[arg(long)]
    pub artifact_out: Option<String>,
}
