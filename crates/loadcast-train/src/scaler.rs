//! Min-max scaling of the target series.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use loadcast_core::LoadcastError;

/// Min-max scaler with fitted bounds.
///
/// `transform` maps the fitted range to [0, 1]. A degenerate range (all
/// values equal) maps every value to 0.0 and inverts to the fitted minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: f64,
    pub data_max: f64,
}

impl MinMaxScaler {
    /// Fit bounds over a series. An empty series cannot be scaled.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(
                LoadcastError::InsufficientData("cannot fit a scaler on an empty series".into())
                    .into(),
            );
        }
        let mut data_min = f64::INFINITY;
        let mut data_max = f64::NEG_INFINITY;
        for &v in values {
            data_min = data_min.min(v);
            data_max = data_max.max(v);
        }
        Ok(Self { data_min, data_max })
    }

    fn range(&self) -> f64 {
        self.data_max - self.data_min
    }

    pub fn transform_value(&self, value: f64) -> f64 {
        let range = self.range();
        if range == 0.0 {
            0.0
        } else {
            (value - self.data_min) / range
        }
    }

    pub fn inverse_value(&self, scaled: f64) -> f64 {
        self.data_min + scaled * self.range()
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform_value(v)).collect()
    }

    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        scaled.iter().map(|&v| self.inverse_value(v)).collect()
    }

    /// Fit on `values` and return the scaled series with the scaler.
    pub fn fit_transform(values: &[f64]) -> Result<(Vec<f64>, Self)> {
        let scaler = Self::fit(values)?;
        let scaled = scaler.transform(values);
        Ok((scaled, scaler))
    }
}
