//! Member filtering for the zipapp container.
//!
//! Installed library trees carry packaging residue (distribution metadata,
//! egg bundles and links, bytecode caches) that the packed application never
//! reads at runtime. The default filter keeps those out of the archive.

use std::path::{Component, Path};

const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_SUFFIX: &str = ".egg";
const EGG_LINK_SUFFIX: &str = ".egg-link";
const BYTECODE_SUFFIX: &str = ".pyc";

/// Decides whether a member path enters the archive.
///
/// Paths are relative to the root of the staged library tree.
pub trait MemberFilter {
    /// Returns `true` to include `path`.
    fn include(&self, path: &Path) -> bool;
}

impl<F> MemberFilter for F
where
    F: Fn(&Path) -> bool,
{
    fn include(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Excludes packaging residue from installed library trees.
///
/// - top-level `*.dist-info` and `*.egg` entries (and everything below them)
/// - `*.egg-link` files
/// - `*.pyc` files
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidueFilter;

impl MemberFilter for ResidueFilter {
    fn include(&self, path: &Path) -> bool {
        let first = path.components().find_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        });
        let last = path.file_name().map(|name| name.to_string_lossy());

        let residue_root = first
            .is_some_and(|f| f.ends_with(DIST_INFO_SUFFIX) || f.ends_with(EGG_SUFFIX));
        let residue_file = last
            .is_some_and(|l| l.ends_with(EGG_LINK_SUFFIX) || l.ends_with(BYTECODE_SUFFIX));

        !(residue_root || residue_file)
    }
}
