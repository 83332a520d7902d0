//! Chronological train/validation split.

use anyhow::Result;
use ndarray::{s, Array2, Array3};

use loadcast_core::LoadcastError;

/// First 80% of pairs train, last 20% validate.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

pub struct SplitSequences {
    pub x_train: Array3<f64>,
    pub y_train: Array2<f64>,
    pub x_val: Array3<f64>,
    pub y_val: Array2<f64>,
}

/// Split window pairs at `floor(n * train_fraction)` without reordering.
///
/// Pairs are already in chronological order, so everything before the split
/// index strictly precedes everything after it — shuffling here would leak
/// future values into training.
pub fn chronological_split(
    x: &Array3<f64>,
    y: &Array2<f64>,
    train_fraction: f64,
) -> Result<SplitSequences> {
    if !(0.0..1.0).contains(&train_fraction) || train_fraction == 0.0 {
        return Err(LoadcastError::InsufficientData(format!(
            "train fraction {train_fraction} must be in (0, 1)"
        ))
        .into());
    }
    let n = x.shape()[0];
    if y.shape()[0] != n {
        return Err(LoadcastError::InsufficientData(format!(
            "X has {} pairs but y has {}",
            n,
            y.shape()[0]
        ))
        .into());
    }
    let split = (n as f64 * train_fraction).floor() as usize;
    if split == 0 || split == n {
        return Err(LoadcastError::InsufficientData(format!(
            "{n} pairs cannot be split at fraction {train_fraction}"
        ))
        .into());
    }

    Ok(SplitSequences {
        x_train: x.slice(s![..split, .., ..]).to_owned(),
        y_train: y.slice(s![..split, ..]).to_owned(),
        x_val: x.slice(s![split.., .., ..]).to_owned(),
        y_val: y.slice(s![split.., ..]).to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::create_sequences;

    #[test]
    fn eighty_twenty_split_preserves_order() {
        // 124 values -> exactly 100 pairs with a window of 24.
        let values: Vec<f64> = (0..124).map(|v| v as f64).collect();
        let (x, y) = create_sequences(&values, 24).unwrap();
        assert_eq!(x.shape()[0], 100);

        let split = chronological_split(&x, &y, 0.8).unwrap();
        assert_eq!(split.x_train.shape(), &[80, 24, 1]);
        assert_eq!(split.x_val.shape(), &[20, 24, 1]);

        // pairs 0..80 train, 80..100 validate, no reordering
        assert_eq!(split.y_train[[0, 0]], 24.0);
        assert_eq!(split.y_train[[79, 0]], 103.0);
        assert_eq!(split.y_val[[0, 0]], 104.0);
        assert_eq!(split.y_val[[19, 0]], 123.0);

        // train windows never contain values newer than the first
        // validation target
        let max_train = split
            .x_train
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(max_train < split.y_val[[0, 0]]);
    }

    #[test]
    fn split_index_uses_floor() {
        let values: Vec<f64> = (0..34).map(|v| v as f64).collect();
        let (x, y) = create_sequences(&values, 24).unwrap(); // 10 pairs
        let split = chronological_split(&x, &y, 0.75).unwrap();
        assert_eq!(split.x_train.shape()[0], 7);
        assert_eq!(split.x_val.shape()[0], 3);
    }

    #[test]
    fn degenerate_fractions_are_rejected() {
        let values: Vec<f64> = (0..30).map(|v| v as f64).collect();
        let (x, y) = create_sequences(&values, 24).unwrap();
        for fraction in [0.0, 1.0, -0.5, 0.05] {
            // 0.05 of 6 pairs floors to zero training pairs
            assert!(chronological_split(&x, &y, fraction).is_err());
        }
    }
}
