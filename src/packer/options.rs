//! Packing options and their builder.

use std::path::{Path, PathBuf};

use super::error::{Context, Result};

/// Immutable options for one packing run.
///
/// Constructed via [`PackOptionsBuilder`].
#[derive(Clone, Debug)]
pub struct PackOptions {
    /// Entry point override (`module` or `module:callable`).
    main: Option<String>,

    /// Destination path override.
    output: Option<PathBuf>,

    /// Deflate members instead of storing them.
    compress: bool,

    /// Interpreter recorded in the directive line and inspected for fusion.
    interpreter: String,

    /// Produce a native-executable style output.
    exe: bool,

    /// Extra directories searched for launcher stubs, ahead of the defaults.
    launcher_dirs: Vec<PathBuf>,
}

impl PackOptions {
    /// Returns the entry point override.
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }

    /// Returns the destination override.
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Returns whether members are deflated.
    pub fn compress(&self) -> bool {
        self.compress
    }

    /// Returns the interpreter path.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Returns whether a native-executable style output was requested.
    pub fn exe(&self) -> bool {
        self.exe
    }

    /// Returns the extra launcher stub directories.
    pub fn launcher_dirs(&self) -> &[PathBuf] {
        &self.launcher_dirs
    }
}

/// Builder for [`PackOptions`].
///
/// # Examples
///
/// ```
/// use kodegen_bundler_zipapp::packer::PackOptionsBuilder;
///
/// # fn example() -> kodegen_bundler_zipapp::packer::Result<()> {
/// let options = PackOptionsBuilder::new()
///     .interpreter("/usr/bin/python3")
///     .main("app.cli:main")
///     .compress(true)
///     .build()?;
/// assert_eq!(options.main(), Some("app.cli:main"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Default)]
pub struct PackOptionsBuilder {
    main: Option<String>,
    output: Option<PathBuf>,
    compress: bool,
    interpreter: Option<String>,
    exe: bool,
    launcher_dirs: Vec<PathBuf>,
}

impl PackOptionsBuilder {
    /// Creates a new options builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the entry point override.
    pub fn main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    /// Sets the destination path override.
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables deflate compression.
    ///
    /// Default: `false` (stored)
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Sets the interpreter.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Requests a native-executable style output.
    ///
    /// Default: `false`
    pub fn exe(mut self, exe: bool) -> Self {
        self.exe = exe;
        self
    }

    /// Sets extra launcher stub directories.
    pub fn launcher_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.launcher_dirs = dirs;
        self
    }

    /// Builds the options.
    ///
    /// # Errors
    ///
    /// Returns an error if no interpreter was set.
    pub fn build(self) -> Result<PackOptions> {
        let interpreter = self
            .interpreter
            .filter(|i| !i.trim().is_empty())
            .context("interpreter is required")?;

        Ok(PackOptions {
            main: self.main,
            output: self.output,
            compress: self.compress,
            interpreter,
            exe: self.exe,
            launcher_dirs: self.launcher_dirs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::Error;

    #[test]
    fn defaults_are_plain_stored_archive() {
        let options = PackOptionsBuilder::new().interpreter("python3").build().unwrap();
        assert_eq!(options.main(), None);
        assert_eq!(options.output(), None);
        assert!(!options.compress());
        assert!(!options.exe());
        assert!(options.launcher_dirs().is_empty());
    }

    #[test]
    fn interpreter_is_required() {
        let err = PackOptionsBuilder::new().build().unwrap_err();
        assert!(matches!(err, Error::GenericError(msg) if msg.contains("interpreter")));

        assert!(PackOptionsBuilder::new().interpreter("  ").build().is_err());
    }
}
