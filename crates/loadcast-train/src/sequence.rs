//! Sliding-window sequence generation.

use anyhow::Result;
use ndarray::{Array2, Array3};

use loadcast_core::LoadcastError;

use crate::scaler::MinMaxScaler;

/// Default input window length, in hours.
pub const DEFAULT_SEQ_LEN: usize = 24;

/// Scaled windows ready for the model-training collaborator.
pub struct Prepared {
    /// Shape (L - W, W, 1).
    pub x: Array3<f64>,
    /// Shape (L - W, 1).
    pub y: Array2<f64>,
    pub scaler: MinMaxScaler,
}

/// Slide a window of `seq_len` over `values` with stride 1.
///
/// Produces `len - seq_len` pairs in increasing start-index order, matching
/// the chronological order of the source series: pair `i` is
/// `(values[i..i+seq_len], values[i+seq_len])`.
pub fn create_sequences(values: &[f64], seq_len: usize) -> Result<(Array3<f64>, Array2<f64>)> {
    if seq_len == 0 {
        return Err(LoadcastError::InsufficientData("window length must be > 0".into()).into());
    }
    if values.len() <= seq_len {
        return Err(LoadcastError::InsufficientData(format!(
            "series of length {} yields no windows of length {}",
            values.len(),
            seq_len
        ))
        .into());
    }

    let pairs = values.len() - seq_len;
    let mut x = Array3::zeros((pairs, seq_len, 1));
    let mut y = Array2::zeros((pairs, 1));
    for i in 0..pairs {
        for j in 0..seq_len {
            x[[i, j, 0]] = values[i + j];
        }
        y[[i, 0]] = values[i + seq_len];
    }
    Ok((x, y))
}

/// Fit a scaler over the whole series, scale it, and window it.
///
/// The fit covers the entire series: apply the returned scaler to any holdout
/// split rather than refitting on it, or the validation metrics leak. See
/// DESIGN.md for the train-only alternative.
pub fn prepare_sequences(series: &[f64], seq_len: usize) -> Result<Prepared> {
    let (scaled, scaler) = MinMaxScaler::fit_transform(series)?;
    let (x, y) = create_sequences(&scaled, seq_len)?;
    Ok(Prepared { x, y, scaler })
}
