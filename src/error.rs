//! Crate-level error types.
//!
//! [`ZipappError`] is what the CLI reports; packing failures arrive wrapped
//! from [`crate::packer::Error`].

use thiserror::Error;

/// Result type alias for CLI-level operations
pub type Result<T> = std::result::Result<T, ZipappError>;

/// Main error type for the zipapp bundler
#[derive(Error, Debug)]
pub enum ZipappError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Packing pipeline errors
    #[error("{0}")]
    Packer(#[from] crate::packer::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}
