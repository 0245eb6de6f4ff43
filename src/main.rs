//! Kodegen Bundler Zipapp - packs Python projects into runnable zipapps.
//!
//! This binary packs an installed library directory into a single zipapp,
//! optionally fused with a native launcher, and reports where it was written.

use std::process;

use kodegen_bundler_zipapp::cli;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            cli::OutputManager::new(false, false).error(&e.to_string());
            1
        }
    };

    process::exit(exit_code);
}
