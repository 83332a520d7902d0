//! I/O layer for the loadcast pipeline: CSV source readers, single-file frame
//! read/write, the Hive-partitioned Parquet writer, and the object-storage
//! transfer boundary.

pub mod frames;
pub mod partition;
pub mod readers;
pub mod transfer;

pub use frames::{read_frame, write_frame};
pub use partition::write_partitioned_parquet;
pub use readers::{read_holiday_csv, read_load_csv, read_weather_csv, HolidaySpec, SourceSpec};
pub use transfer::{BlobStore, LocalBlobStore};
