//! Zipapp packing pipeline.
//!
//! Turns a staged library tree into a single runnable archive:
//!
//! 1. [`entry_point::resolve`] picks the `__main__` entry point
//! 2. [`archive::build`] writes the interpreter directive and the zip
//!    container, applying a [`MemberFilter`]
//! 3. [`LauncherFuser`] prepends a native launcher stub when an executable is
//!    requested on a host that runs them
//! 4. [`output`] names the file, writes it and sets the executable bit
//!
//! [`Packer`] sequences these steps and guarantees the staged tree is released.
//!
//! # Module Organization
//!
//! - [`archive`] - Directive line and zip container assembly
//! - [`checksum`] - SHA-256 of the written artifact
//! - [`entry_point`] - Entry-point resolution and bootstrap rendering
//! - [`error`] - Error taxonomy and context helpers
//! - [`filter`] - Member filtering
//! - [`launcher`] - Launcher stub selection and fusion
//! - [`options`] - Packing options and builder
//! - [`output`] - Output naming and atomic write
//! - `orchestrator` - The [`Packer`] pipeline
//! - [`platform`] - Host capability predicate
//! - [`progress`] - Progress sink seam

pub mod archive;
pub mod checksum;
pub mod entry_point;
pub mod error;
pub mod filter;
pub mod launcher;
pub mod options;
mod orchestrator;
pub mod output;
pub mod platform;
pub mod progress;

pub use entry_point::EntryPoint;
pub use error::{Context, Error, ErrorExt, Result};
pub use filter::{MemberFilter, ResidueFilter};
pub use launcher::{DirectoryStubs, LauncherFuser, LauncherKind, StubSource, WordWidth};
pub use options::{PackOptions, PackOptionsBuilder};
pub use orchestrator::{PackedArtifact, Packer, ProjectInfo};
pub use platform::HostPlatform;
pub use progress::{ProgressSink, RecordedProgress, SilentProgress};
