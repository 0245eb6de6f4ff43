//! Error types for the packing pipeline.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

use super::launcher::LauncherKind;

/// Result alias for packer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while staging, archiving, fusing or writing a zipapp.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// No entry point was given or declared and the tree has no `__main__.py`.
    #[error("no entry point given or declared, and the library tree has no __main__.py")]
    MissingEntryPoint,

    /// Entry point string is not `module` or `module:callable`.
    #[error("invalid entry point {0:?}: expected `module` or `module:callable`")]
    InvalidEntryPoint(String),

    /// An entry point was given but the tree already ships its own `__main__.py`.
    #[error("cannot set entry point {entry_point:?}: {} already contains __main__.py", path.display())]
    EntryPointConflict {
        /// Requested entry point.
        entry_point: String,
        /// Root of the staged library tree.
        path: PathBuf,
    },

    /// No launcher stub matching the interpreter was found.
    #[error("no {kind} launcher stub ({}) is available", kind.resource_name())]
    LauncherUnavailable {
        /// The stub variant that was looked up.
        kind: LauncherKind,
    },

    /// The interpreter binary could not be located or parsed.
    #[error("failed to inspect interpreter {}: {reason}", path.display())]
    InterpreterInspection {
        /// Interpreter path that was inspected.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Filesystem error with context.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: io::Error,
    },

    /// Plain IO error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Zip container error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory walk error.
    #[error("failed to walk directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix error.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Adds context to an `Option`, producing a [`Error::GenericError`].
pub trait Context<T> {
    /// Attaches a message to the failure case.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Attaches a lazily built message to the failure case.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps the error as [`Error::Fs`] with what was being done and where.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Returns early with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::packer::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::packer::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
