use std::path::Path;

use anyhow::Result;
use tracing::info;

use loadcast_etl::FeaturePipeline;

pub fn handle(config: &str) -> Result<()> {
    let pipeline = FeaturePipeline::from_config_path(Path::new(config))?;
    let summary = pipeline.run()?;
    info!(
        "feature build complete: {} regions x {} hours = {} rows -> {}",
        summary.regions,
        summary.hours,
        summary.rows,
        summary.output_root.display()
    );
    if summary.weather_rows > 0 {
        info!("validated {} weather rows", summary.weather_rows);
    }
    Ok(())
}
