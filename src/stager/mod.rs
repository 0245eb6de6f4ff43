//! Library staging.
//!
//! Packing reads from a staged copy of the installed library tree. The copy is
//! owned by a [`StagedLibrary`] guard and removed when the guard is released
//! or dropped, whether packing succeeded or not.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::bail;
use crate::packer::error::{ErrorExt, Result};

/// Produces the directory of installed package files to ship.
pub trait LibraryStager {
    /// Stages the library tree and returns the guard that owns it.
    fn prepare(&self) -> Result<StagedLibrary>;
}

/// A staged library tree, removed on release or drop.
#[derive(Debug)]
pub struct StagedLibrary {
    dir: TempDir,
}

impl StagedLibrary {
    /// Wraps an already-populated temporary directory.
    pub fn new(dir: TempDir) -> Self {
        Self { dir }
    }

    /// Root of the staged tree. Read only for downstream stages.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes the staged tree, reporting any cleanup failure.
    pub fn release(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().fs_context("removing staged library", path)
    }
}

/// Stages by copying an already-installed library directory.
#[derive(Debug, Clone)]
pub struct CopyStager {
    source: PathBuf,
}

impl CopyStager {
    /// Creates a stager copying from `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl LibraryStager for CopyStager {
    fn prepare(&self) -> Result<StagedLibrary> {
        if !self.source.is_dir() {
            bail!(
                "library directory {} does not exist or is not a directory",
                self.source.display()
            );
        }

        let staging = tempfile::Builder::new()
            .prefix("kodegen-zipapp-")
            .tempdir()
            .fs_context("creating staging directory", std::env::temp_dir())?;

        log::debug!(
            "Staging {} into {}",
            self.source.display(),
            staging.path().display()
        );
        copy_dir(&self.source, staging.path())?;

        Ok(StagedLibrary::new(staging))
    }
}

/// Recursively copies the contents of `from` into the existing directory `to`.
///
/// Symlinks are followed so the staged tree holds real files.
fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(true).min_depth(1) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating staged directory", &dest_path)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &dest_path).fs_context("copying library file", entry.path())?;
        } else {
            log::debug!("Skipping special file {}", entry.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_tree_and_removes_it_on_release() {
        let source = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(source.path().join("pkg/sub")).unwrap();
        std::fs::write(source.path().join("pkg/__init__.py"), "").unwrap();
        std::fs::write(source.path().join("pkg/sub/mod.py"), "X = 1\n").unwrap();

        let staged = CopyStager::new(source.path()).prepare().unwrap();
        let root = staged.path().to_path_buf();

        assert_ne!(root, source.path());
        assert_eq!(std::fs::read_to_string(root.join("pkg/sub/mod.py")).unwrap(), "X = 1\n");

        staged.release().unwrap();
        assert!(!root.exists());
        assert!(source.path().join("pkg/sub/mod.py").exists());
    }

    #[test]
    fn dropping_the_guard_also_cleans_up() {
        let source = tempfile::tempdir().unwrap();
        std::fs::write(source.path().join("six.py"), "").unwrap();

        let root = {
            let staged = CopyStager::new(source.path()).prepare().unwrap();
            staged.path().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CopyStager::new(dir.path().join("nope")).prepare().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
