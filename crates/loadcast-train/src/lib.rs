//! Training-side data preparation: min-max scaling, sliding-window sequence
//! generation, chronological splitting, and the persisted training artifact.
//!
//! Everything here is ephemeral per training run except the artifact, which
//! carries the fitted scaler bounds so served predictions can be de-scaled.

pub mod artifact;
pub mod scaler;
pub mod sequence;
pub mod split;

pub use artifact::TrainingArtifact;
pub use scaler::MinMaxScaler;
pub use sequence::{create_sequences, prepare_sequences, Prepared, DEFAULT_SEQ_LEN};
pub use split::{chronological_split, SplitSequences, DEFAULT_TRAIN_FRACTION};
