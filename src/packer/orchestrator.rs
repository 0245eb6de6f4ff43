//! Packing pipeline orchestration.
//!
//! Stage the library, build the base archive, optionally fuse a launcher,
//! write the result, then release the staged tree. The staged tree is
//! released on every path out of [`Packer::pack`], including failures.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use super::archive::{self, ArchiveSpec};
use super::checksum::calculate_sha256;
use super::entry_point;
use super::error::Result;
use super::filter::{MemberFilter, ResidueFilter};
use super::launcher::{LauncherFuser, StubSource};
use super::options::PackOptions;
use super::output;
use super::platform::HostPlatform;
use super::progress::ProgressSink;
use crate::stager::LibraryStager;

/// Project facts the pipeline needs.
#[derive(Clone, Debug, Default)]
pub struct ProjectInfo {
    /// Project name, used to derive the output file name.
    pub name: String,
    /// Declared console scripts, in declaration order.
    pub scripts: IndexMap<String, String>,
}

/// A written zipapp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedArtifact {
    /// Where the zipapp was written.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex SHA-256 of the written bytes.
    pub checksum: String,
    /// Whether a launcher stub was prepended.
    pub fused: bool,
}

/// Main packing orchestrator.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_zipapp::packer::{
///     DirectoryStubs, HostPlatform, PackOptionsBuilder, Packer, ProjectInfo, SilentProgress,
/// };
/// use kodegen_bundler_zipapp::stager::CopyStager;
///
/// # fn example() -> kodegen_bundler_zipapp::packer::Result<()> {
/// let options = PackOptionsBuilder::new()
///     .interpreter("/usr/bin/python3")
///     .main("app.cli:main")
///     .build()?;
/// let stager = CopyStager::new("build/lib");
/// let stubs = DirectoryStubs::default();
///
/// let packer = Packer::new(options, &stager, &stubs, HostPlatform::current());
/// let artifact = packer.pack(&ProjectInfo { name: "app".into(), ..Default::default() }, &SilentProgress)?;
/// println!("Created {} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
pub struct Packer<'a> {
    options: PackOptions,
    stager: &'a dyn LibraryStager,
    stubs: &'a dyn StubSource,
    platform: HostPlatform,
    filter: &'a dyn MemberFilter,
}

impl<'a> Packer<'a> {
    /// Creates a packer using the default residue filter.
    pub fn new(
        options: PackOptions,
        stager: &'a dyn LibraryStager,
        stubs: &'a dyn StubSource,
        platform: HostPlatform,
    ) -> Self {
        Self {
            options,
            stager,
            stubs,
            platform,
            filter: &ResidueFilter,
        }
    }

    /// Replaces the member filter.
    pub fn with_filter(mut self, filter: &'a dyn MemberFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Runs the whole pipeline and returns the written artifact.
    pub fn pack(&self, project: &ProjectInfo, progress: &dyn ProgressSink) -> Result<PackedArtifact> {
        let entry_point = entry_point::resolve(self.options.main(), &project.scripts);
        match &entry_point {
            Some(entry) => log::info!("Entry point: {entry}"),
            None => log::info!("No entry point, relying on __main__.py in the library"),
        }

        progress.progress("Packing packages...");
        let staged = self.stager.prepare()?;
        progress.progress(&format!("Packages are prepared at {}", staged.path().display()));

        let result = self.pack_staged(staged.path(), project, entry_point.as_deref(), progress);
        let released = staged.release();

        let artifact = result?;
        released?;
        Ok(artifact)
    }

    fn pack_staged(
        &self,
        lib: &Path,
        project: &ProjectInfo,
        entry_point: Option<&str>,
        progress: &dyn ProgressSink,
    ) -> Result<PackedArtifact> {
        progress.progress("Creating zipapp...");
        let mut bytes = archive::build(&ArchiveSpec {
            source_dir: lib,
            interpreter: self.options.interpreter(),
            entry_point,
            filter: self.filter,
            compress: self.options.compress(),
        })?;

        let fused = self.should_fuse();
        if fused {
            let fuser = LauncherFuser::new(self.stubs);
            let kind = fuser.select(self.options.interpreter())?;
            progress.progress(&format!("Fusing {kind} launcher..."));
            bytes = fuser.fuse_kind(kind, bytes)?;
        } else if self.options.exe() {
            log::debug!("Native launchers unsupported on this host, writing a plain executable zipapp");
        }

        let path = output::resolve_output_path(
            self.options.output(),
            &project.name,
            self.options.exe(),
            self.platform,
        );
        output::write_output(&bytes, &path, self.options.exe())?;

        Ok(PackedArtifact {
            path,
            size: bytes.len() as u64,
            checksum: calculate_sha256(&bytes),
            fused,
        })
    }

    fn should_fuse(&self) -> bool {
        self.options.exe() && self.platform.supports_native_launchers()
    }
}
