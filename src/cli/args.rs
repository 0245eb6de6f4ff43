//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation of
//! the arguments clap itself cannot check.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Zipapp packer for Python projects
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_zipapp",
    version,
    about = "Pack a Python project's installed packages into a runnable zipapp",
    long_about = "Packs an installed library directory into a single zipapp with an interpreter
directive, optionally fused with a native launcher stub.

Usage:
  kodegen_bundler_zipapp pack --lib build/lib
  kodegen_bundler_zipapp pack --lib build/lib -m app.cli:main -c -o dist/app.pyz
  kodegen_bundler_zipapp pack --lib build/lib --exe -i C:/Python311/python.exe

Exit code 0 = zipapp guaranteed to exist at the printed path."
)]
pub struct Args {
    /// Show debug details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and the final path
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack the packages into a zipapp
    Pack(PackArgs),
}

/// Arguments of the `pack` command
#[derive(clap::Args, Debug, Clone)]
pub struct PackArgs {
    /// Specify the console script entry point for the zipapp
    #[arg(short, long, value_name = "ENTRY_POINT")]
    pub main: Option<String>,

    /// Specify the output filename, default: the project name
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Compress files with the deflate method, no compress by default
    #[arg(short, long)]
    pub compress: bool,

    /// The Python interpreter path, default: the project interpreter
    #[arg(short, long, value_name = "PATH")]
    pub interpreter: Option<String>,

    /// Create an executable file
    ///
    /// If the output file isn't given, the file name will end with .exe
    /// (Windows) or have no suffix (POSIX).
    #[arg(long)]
    pub exe: bool,

    /// Project root containing pyproject.toml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Directory holding the installed packages to pack
    #[arg(short, long, value_name = "DIR", env = "KODEGEN_ZIPAPP_LIB")]
    pub lib: PathBuf,

    /// Extra directory searched for launcher stubs (t32.exe, t64.exe, w32.exe, w64.exe)
    #[arg(
        long = "launcher-dir",
        value_name = "DIR",
        env = "KODEGEN_ZIPAPP_LAUNCHER_DIR",
        value_delimiter = ','
    )]
    pub launcher_dirs: Vec<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Pack(pack) => pack.validate(),
        }
    }
}

impl PackArgs {
    /// Validate `pack` arguments
    pub fn validate(&self) -> Result<(), String> {
        if !self.lib.is_dir() {
            return Err(format!(
                "Library directory not found: {}",
                self.lib.display()
            ));
        }

        if self.main.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err("Entry point (--main) cannot be empty".to_string());
        }

        if self.interpreter.as_deref().is_some_and(|i| i.trim().is_empty()) {
            return Err("Interpreter (--interpreter) cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) {
        self.output.success(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message)
    }
}

impl crate::packer::ProgressSink for RuntimeConfig {
    fn progress(&self, message: &str) {
        self.output.progress(message)
    }
}
