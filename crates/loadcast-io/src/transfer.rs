//! Object-storage transfer boundary.
//!
//! The pipeline only needs two operations from a blob store: copy one named
//! blob to a local path before feature work, and upload a local directory
//! tree to a blob prefix after model export. Both must preserve byte content,
//! and the upload must preserve relative path structure. Cloud-backed stores
//! are external collaborators implementing [`BlobStore`]; the filesystem
//! implementation here backs tests and local runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Minimal blob-store contract used by the pipeline.
pub trait BlobStore {
    /// Copy the blob named `key` to `dest`, creating parent directories.
    fn fetch(&self, key: &str, dest: &Path) -> Result<()>;

    /// Upload every file under `local_dir` to `prefix`, preserving the
    /// relative path of each file.
    fn upload_tree(&self, local_dir: &Path, prefix: &str) -> Result<()>;
}

/// Filesystem-rooted blob store: keys are paths relative to `root`.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobStore for LocalBlobStore {
    fn fetch(&self, key: &str, dest: &Path) -> Result<()> {
        let src = self.root.join(key);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating '{}'", parent.display()))?;
        }
        fs::copy(&src, dest)
            .with_context(|| format!("fetching blob '{}' to '{}'", key, dest.display()))?;
        Ok(())
    }

    fn upload_tree(&self, local_dir: &Path, prefix: &str) -> Result<()> {
        for entry in WalkDir::new(local_dir) {
            let entry = entry.with_context(|| format!("walking '{}'", local_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(local_dir)
                .with_context(|| format!("relativizing '{}'", entry.path().display()))?;
            let target = self.root.join(prefix).join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating '{}'", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "uploading '{}' to '{}'",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fetch_copies_blob_bytes() {
        let store_dir = tempdir().unwrap();
        let work_dir = tempdir().unwrap();
        fs::write(store_dir.path().join("features.parquet"), b"parquet bytes").unwrap();

        let store = LocalBlobStore::new(store_dir.path());
        let dest = work_dir.path().join("data/features.parquet");
        store.fetch("features.parquet", &dest).unwrap();
        assert_eq!(fs::read(dest).unwrap(), b"parquet bytes");
    }

    #[test]
    fn upload_tree_preserves_structure() {
        let store_dir = tempdir().unwrap();
        let model_dir = tempdir().unwrap();
        fs::create_dir_all(model_dir.path().join("variables")).unwrap();
        fs::write(model_dir.path().join("saved_model.pb"), b"graph").unwrap();
        fs::write(
            model_dir.path().join("variables/variables.index"),
            b"index",
        )
        .unwrap();

        let store = LocalBlobStore::new(store_dir.path());
        store
            .upload_tree(model_dir.path(), "models/best")
            .unwrap();

        let base = store_dir.path().join("models/best");
        assert_eq!(fs::read(base.join("saved_model.pb")).unwrap(), b"graph");
        assert_eq!(
            fs::read(base.join("variables/variables.index")).unwrap(),
            b"index"
        );
    }

    #[test]
    fn fetch_missing_blob_fails() {
        let store_dir = tempdir().unwrap();
        let work_dir = tempdir().unwrap();
        let store = LocalBlobStore::new(store_dir.path());
        assert!(store
            .fetch("nope.bin", &work_dir.path().join("nope.bin"))
            .is_err());
    }
}
