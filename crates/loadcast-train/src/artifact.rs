//! Persisted training artifact.
//!
//! The fitted scaler must travel with the exported model: without its bounds,
//! served predictions cannot be mapped back to megawatts. The artifact is a
//! small JSON document written next to the model export and uploaded with it.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scaler::MinMaxScaler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingArtifact {
    pub seq_len: usize,
    pub train_fraction: f64,
    pub scaler: MinMaxScaler,
}

impl TrainingArtifact {
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating '{}'", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("creating training artifact '{}'", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("writing training artifact '{}'", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening training artifact '{}'", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("parsing training artifact '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn artifact_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved_model/scaler.json");
        let artifact = TrainingArtifact {
            seq_len: 24,
            train_fraction: 0.8,
            scaler: MinMaxScaler {
                data_min: 812.5,
                data_max: 25_695.0,
            },
        };
        artifact.save(&path).unwrap();

        let loaded = TrainingArtifact::load(&path).unwrap();
        assert_eq!(artifact, loaded);

        // reloaded bounds de-scale predictions exactly like the original
        let prediction = 0.42;
        assert_eq!(
            artifact.scaler.inverse_value(prediction),
            loaded.scaler.inverse_value(prediction)
        );
    }
}
