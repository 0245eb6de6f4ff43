//! Zipapp bundler library for Python projects
//!
//! This library packs an installed Python library tree into:
//! - a `.pyz` zipapp runnable through its interpreter directive
//! - a directly executable zipapp (no suffix) on POSIX hosts
//! - a native `.exe`, fused with a launcher stub, on Windows
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod packer;
pub mod stager;

// Re-export commonly used types
pub use error::{CliError, Result, ZipappError};
