//! Colored terminal output.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing messages to the terminal.
///
/// Progress and success lines go to stdout, errors to stderr.
/// Quiet mode keeps only errors and [`OutputManager::result`] lines.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Prints a progress step.
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            self.emit(false, None, "", message);
        }
    }

    /// Prints a message only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(false, Some(Color::Cyan), "", message);
        }
    }

    /// Prints a success message.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(false, Some(Color::Green), "✓ ", message);
        }
    }

    /// Prints an indented detail line.
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            self.emit(false, None, "  ", message);
        }
    }

    /// Prints a line that survives quiet mode (e.g. the output path).
    pub fn result(&self, message: &str) {
        self.emit(false, Some(Color::Green), "", message);
    }

    /// Prints an error. Never suppressed.
    pub fn error(&self, message: &str) {
        self.emit(true, Some(Color::Red), "Error: ", message);
    }

    fn emit(&self, to_stderr: bool, color: Option<Color>, prefix: &str, message: &str) {
        let mut stream = if to_stderr {
            StandardStream::stderr(ColorChoice::Auto)
        } else {
            StandardStream::stdout(ColorChoice::Auto)
        };

        // Terminal write failures are not actionable here
        let _ = stream.set_color(ColorSpec::new().set_fg(color));
        let _ = write!(stream, "{prefix}{message}");
        let _ = stream.reset();
        let _ = writeln!(stream);
    }
}
