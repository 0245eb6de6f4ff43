//! Command line interface for the zipapp bundler.
//!
//! Parses arguments, loads project metadata, wires the stager and launcher
//! stub source into the [`Packer`], and reports the result.

mod args;
mod output;

pub use args::{Args, Command, PackArgs, RuntimeConfig};
pub use output::OutputManager;

use std::path::PathBuf;

use crate::error::{CliError, Result, ZipappError};
use crate::metadata;
use crate::packer::launcher::locate_interpreter;
use crate::packer::{DirectoryStubs, HostPlatform, PackOptionsBuilder, PackedArtifact, Packer};
use crate::stager::CopyStager;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);

    args.validate().map_err(|reason| {
        ZipappError::Cli(CliError::InvalidArguments { reason })
    })?;

    match &args.command {
        Command::Pack(pack_args) => {
            let artifact = pack(pack_args, &config)?;
            report(&artifact, &config);
        }
    }

    Ok(0)
}

/// Runs the `pack` command
pub fn pack(args: &PackArgs, config: &RuntimeConfig) -> Result<PackedArtifact> {
    let project = metadata::load_project(&args.project)?;

    let interpreter = match &args.interpreter {
        Some(interpreter) => interpreter.clone(),
        None => metadata::default_interpreter(&args.project)?,
    };
    config.verbose_println(&format!("Interpreter: {interpreter}"));

    let mut builder = PackOptionsBuilder::new()
        .interpreter(interpreter.clone())
        .compress(args.compress)
        .exe(args.exe)
        .launcher_dirs(args.launcher_dirs.clone());
    if let Some(main) = &args.main {
        builder = builder.main(main.clone());
    }
    if let Some(output) = &args.output {
        builder = builder.output(output);
    }
    let options = builder.build()?;

    let stager = CopyStager::new(&args.lib);
    let interpreter_path =
        locate_interpreter(&interpreter).unwrap_or_else(|_| PathBuf::from(&interpreter));
    let stubs = DirectoryStubs::for_interpreter(&interpreter_path, options.launcher_dirs());

    let packer = Packer::new(options, &stager, &stubs, HostPlatform::current());
    Ok(packer.pack(&project, config)?)
}

fn report(artifact: &PackedArtifact, config: &RuntimeConfig) {
    config
        .output()
        .result(&format!("Zipapp is generated at {}", artifact.path.display()));
    config.indent(&format!("Size: {} bytes", artifact.size));
    config.indent(&format!("SHA256: {}", artifact.checksum));
    if artifact.fused {
        config.success("Native launcher fused");
    }
}
