//! Zipapp archive assembly.
//!
//! The base archive is the interpreter directive line followed by a zip
//! container holding the filtered library tree and, when an entry point is
//! set, a generated `__main__.py`.

use std::io::{Cursor, Write};
use std::path::{Component, Path};

use walkdir::WalkDir;
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

use super::entry_point::EntryPoint;
use super::error::{Error, ErrorExt, Result};
use super::filter::MemberFilter;

const MAIN_MODULE: &str = "__main__.py";
const MEMBER_PERMISSIONS: u32 = 0o644;

/// Inputs for one archive build.
pub struct ArchiveSpec<'a> {
    /// Root of the staged library tree.
    pub source_dir: &'a Path,
    /// Interpreter recorded in the directive line.
    pub interpreter: &'a str,
    /// Entry point to bootstrap, if any.
    pub entry_point: Option<&'a str>,
    /// Member filter.
    pub filter: &'a dyn MemberFilter,
    /// Deflate every member instead of storing it.
    pub compress: bool,
}

/// Builds the base archive bytes: `#!<interpreter>\n` then the zip container.
pub fn build(spec: &ArchiveSpec<'_>) -> Result<Vec<u8>> {
    let entry_point = spec.entry_point.map(EntryPoint::parse).transpose()?;
    let has_main = spec.source_dir.join(MAIN_MODULE).is_file();

    match (&entry_point, has_main) {
        (Some(entry), true) => {
            return Err(Error::EntryPointConflict {
                entry_point: entry.to_string(),
                path: spec.source_dir.to_path_buf(),
            });
        }
        (None, false) => return Err(Error::MissingEntryPoint),
        _ => {}
    }

    let container = write_container(spec, entry_point.as_ref())?;

    let mut archive = directive(spec.interpreter);
    archive.extend_from_slice(&container);
    Ok(archive)
}

/// Renders the interpreter directive line.
pub fn directive(interpreter: &str) -> Vec<u8> {
    format!("#!{interpreter}\n").into_bytes()
}

fn write_container(spec: &ArchiveSpec<'_>, entry_point: Option<&EntryPoint>) -> Result<Vec<u8>> {
    let method = if spec.compress {
        CompressionMethod::Deflated
    } else {
        CompressionMethod::Stored
    };
    let options = SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(DateTime::default())
        .unix_permissions(MEMBER_PERMISSIONS);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut members = 0usize;
    let mut skipped = 0usize;

    let walker = WalkDir::new(spec.source_dir)
        .follow_links(true)
        .sort_by_file_name()
        .min_depth(1);

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(spec.source_dir)?;
        if !spec.filter.include(relative) {
            log::trace!("Skipping {}", relative.display());
            skipped += 1;
            continue;
        }

        let contents = std::fs::read(entry.path()).fs_context("reading library file", entry.path())?;
        zip.start_file(member_name(relative), options)?;
        zip.write_all(&contents)?;
        members += 1;
    }

    if let Some(entry) = entry_point {
        log::debug!("Generating {MAIN_MODULE} for {entry}");
        zip.start_file(MAIN_MODULE, options)?;
        zip.write_all(entry.bootstrap().as_bytes())?;
        members += 1;
    }

    log::info!("Archived {members} members ({skipped} filtered out)");

    Ok(zip.finish()?.into_inner())
}

/// Archive member names always use `/` separators.
fn member_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
