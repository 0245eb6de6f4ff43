//! Native launcher fusion.
//!
//! On hosts that cannot execute an interpreter directive directly, a zipapp
//! becomes a native executable by prepending a pre-built launcher stub. The
//! stub locates the archive appended to itself, so the two are concatenated
//! with nothing in between.
//!
//! Four stubs exist, keyed by interpreter word width and by whether the
//! interpreter is the windowed (no console) variant:
//!
//! | Stub      | Width | Windowed |
//! |-----------|-------|----------|
//! | `t32.exe` | 32    | no       |
//! | `t64.exe` | 64    | no       |
//! | `w32.exe` | 32    | yes      |
//! | `w64.exe` | 64    | yes      |

mod arch;
mod stubs;

pub use arch::{WordWidth, detect_word_width, locate_interpreter};
pub use stubs::{DirectoryStubs, StubSource};

use std::fmt;
use std::path::Path;

use super::error::{Error, Result};

/// Selects one of the four launcher stubs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LauncherKind {
    /// Interpreter word width.
    pub width: WordWidth,
    /// Whether the interpreter is a windowed (GUI) variant.
    pub windowed: bool,
}

impl LauncherKind {
    /// All stub variants.
    pub const ALL: [LauncherKind; 4] = [
        LauncherKind { width: WordWidth::Bits32, windowed: false },
        LauncherKind { width: WordWidth::Bits64, windowed: false },
        LauncherKind { width: WordWidth::Bits32, windowed: true },
        LauncherKind { width: WordWidth::Bits64, windowed: true },
    ];

    /// File name of the stub resource, e.g. `t64.exe`.
    pub fn resource_name(&self) -> String {
        let prefix = if self.windowed { "w" } else { "t" };
        format!("{prefix}{}.exe", self.width.as_str())
    }
}

impl fmt::Display for LauncherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = if self.windowed { "windowed" } else { "console" };
        write!(f, "{}-bit {variant}", self.width.as_str())
    }
}

/// Returns `true` when the interpreter file name marks the windowed variant.
pub fn is_windowed(interpreter: &Path) -> bool {
    interpreter
        .file_name()
        .is_some_and(|name| name.to_string_lossy().to_ascii_lowercase().contains("pythonw"))
}

/// Prepends launcher stubs to base archive bytes.
pub struct LauncherFuser<'a> {
    stubs: &'a dyn StubSource,
}

impl<'a> LauncherFuser<'a> {
    /// Creates a fuser backed by the given stub source.
    pub fn new(stubs: &'a dyn StubSource) -> Self {
        Self { stubs }
    }

    /// Determines which stub matches `interpreter`.
    pub fn select(&self, interpreter: &str) -> Result<LauncherKind> {
        let binary = locate_interpreter(interpreter)?;
        let width = detect_word_width(&binary)?;
        let windowed = is_windowed(&binary);
        log::debug!(
            "Interpreter {} is {}-bit{}",
            binary.display(),
            width.as_str(),
            if windowed { " (windowed)" } else { "" }
        );
        Ok(LauncherKind { width, windowed })
    }

    /// Selects the stub for `interpreter` and prepends it to `base`.
    pub fn fuse(&self, base: Vec<u8>, interpreter: &str) -> Result<Vec<u8>> {
        let kind = self.select(interpreter)?;
        self.fuse_kind(kind, base)
    }

    /// Prepends the stub for `kind` to `base`, byte for byte.
    pub fn fuse_kind(&self, kind: LauncherKind, base: Vec<u8>) -> Result<Vec<u8>> {
        let stub = self
            .stubs
            .load(kind)?
            .ok_or(Error::LauncherUnavailable { kind })?;

        log::info!(
            "Prepending {} launcher ({} bytes)",
            kind.resource_name(),
            stub.len()
        );

        let mut fused = Vec::with_capacity(stub.len() + base.len());
        fused.extend_from_slice(&stub);
        fused.extend_from_slice(&base);
        Ok(fused)
    }
}
