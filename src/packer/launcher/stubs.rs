//! Launcher stub lookup.

use std::path::{Path, PathBuf};

use super::LauncherKind;
use crate::packer::error::{ErrorExt, Result};

/// Source of launcher stub bytes.
pub trait StubSource {
    /// Loads the stub for `kind`, or `None` when this source has no such stub.
    fn load(&self, kind: LauncherKind) -> Result<Option<Vec<u8>>>;
}

/// Looks stubs up by file name in an ordered list of directories.
#[derive(Debug, Clone, Default)]
pub struct DirectoryStubs {
    search_dirs: Vec<PathBuf>,
}

impl DirectoryStubs {
    /// Creates a source searching `search_dirs` in order.
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Builds the default search path for an interpreter.
    ///
    /// Order: `extra_dirs`, then the `distlib` copies shipped in the
    /// interpreter's `site-packages` (standalone and pip-vendored), then the
    /// user data directory.
    pub fn for_interpreter(interpreter: &Path, extra_dirs: &[PathBuf]) -> Self {
        let mut search_dirs = extra_dirs.to_vec();

        if let Some(prefix) = interpreter.parent() {
            // Windows layouts keep python.exe in the prefix, venvs in Scripts/
            let prefixes = [Some(prefix), prefix.parent()];
            for prefix in prefixes.into_iter().flatten() {
                let site_packages = prefix.join("Lib").join("site-packages");
                search_dirs.push(site_packages.join("distlib"));
                search_dirs.push(site_packages.join("pip").join("_vendor").join("distlib"));
            }
        }

        if let Some(data_dir) = dirs::data_dir() {
            search_dirs.push(data_dir.join("kodegen").join("zipapp").join("launchers"));
        }

        Self { search_dirs }
    }

    /// Directories searched, in order.
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }
}

impl StubSource for DirectoryStubs {
    fn load(&self, kind: LauncherKind) -> Result<Option<Vec<u8>>> {
        let name = kind.resource_name();

        for dir in &self.search_dirs {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                log::debug!("Found launcher stub at {}", candidate.display());
                let bytes = std::fs::read(&candidate).fs_context("reading launcher stub", &candidate)?;
                return Ok(Some(bytes));
            }
            log::trace!("Launcher stub not in {}", dir.display());
        }

        log::warn!("No {name} launcher stub found in {} directories", self.search_dirs.len());
        Ok(None)
    }
}
