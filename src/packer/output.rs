//! Output path selection and final write.

use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::error::{Context, ErrorExt, Result};
use super::platform::HostPlatform;

static UNSAFE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9.]+").expect("name pattern is valid"));

/// Turns a project name into a filesystem-safe file stem.
///
/// Runs of characters outside `[A-Za-z0-9.]` collapse into a single `_`,
/// so `My-Project` becomes `My_Project`.
pub fn safe_file_stem(project_name: &str) -> String {
    UNSAFE_NAME_CHARS.replace_all(project_name, "_").into_owned()
}

/// Suffix of a derived output file name.
pub fn output_suffix(exe: bool, platform: HostPlatform) -> &'static str {
    match (exe, platform.supports_native_launchers()) {
        (false, _) => ".pyz",
        (true, true) => ".exe",
        (true, false) => "",
    }
}

/// Picks the destination: the explicit override, else `<stem><suffix>`.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    project_name: &str,
    exe: bool,
    platform: HostPlatform,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    PathBuf::from(format!(
        "{}{}",
        safe_file_stem(project_name),
        output_suffix(exe, platform)
    ))
}

/// Writes `bytes` to `destination`.
///
/// Bytes go to a temporary sibling first and are renamed into place only after
/// the write (and, for executables, the permission change) succeeded, so a
/// failure never leaves a truncated file under the final name. A replaced
/// file's permission bits carry over to the new one.
pub fn write_output(bytes: &[u8], destination: &Path, executable: bool) -> Result<()> {
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).fs_context("creating output directory", &parent)?;

    let file_name = destination
        .file_name()
        .with_context(|| format!("output path {} has no file name", destination.display()))?;

    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name.to_string_lossy()))
        .suffix(".partial")
        .make_in(&parent, |path| std::fs::File::create(path))
        .fs_context("creating temporary output", &parent)?;

    staged
        .as_file_mut()
        .write_all(bytes)
        .fs_context("writing zipapp", staged.path().to_path_buf())?;
    staged
        .as_file()
        .sync_all()
        .fs_context("flushing zipapp", staged.path().to_path_buf())?;

    // Replacing an existing file keeps its mode
    if let Ok(existing) = std::fs::metadata(destination) {
        std::fs::set_permissions(staged.path(), existing.permissions())
            .fs_context("copying output permissions", staged.path().to_path_buf())?;
    }

    if executable {
        add_owner_exec(staged.path())?;
    }

    staged
        .persist(destination)
        .map_err(|e| e.error)
        .fs_context("moving zipapp into place", destination)?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), destination.display());
    Ok(())
}

/// Adds the owner-executable bit, keeping every existing bit.
#[cfg(unix)]
fn add_owner_exec(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .fs_context("reading output permissions", path)?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o100);
    std::fs::set_permissions(path, permissions).fs_context("setting executable bit", path)
}

#[cfg(not(unix))]
fn add_owner_exec(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIVE: HostPlatform = HostPlatform::new(true);
    const POSIX: HostPlatform = HostPlatform::new(false);

    #[test]
    fn normalizes_project_names() {
        assert_eq!(safe_file_stem("My-Project"), "My_Project");
        assert_eq!(safe_file_stem("a  b--c"), "a_b_c");
        assert_eq!(safe_file_stem("pkg.name"), "pkg.name");
        assert_eq!(safe_file_stem("../escape"), ".._escape");
    }

    #[test]
    fn derived_names_follow_mode_and_platform() {
        let derive = |exe, platform| resolve_output_path(None, "My-Project", exe, platform);
        assert_eq!(derive(false, POSIX), PathBuf::from("My_Project.pyz"));
        assert_eq!(derive(false, NATIVE), PathBuf::from("My_Project.pyz"));
        assert_eq!(derive(true, NATIVE), PathBuf::from("My_Project.exe"));
        assert_eq!(derive(true, POSIX), PathBuf::from("My_Project"));
    }

    #[test]
    fn explicit_output_wins() {
        let path = resolve_output_path(Some(Path::new("dist/tool")), "My-Project", true, NATIVE);
        assert_eq!(path, PathBuf::from("dist/tool"));
    }

    #[test]
    fn writes_bytes_and_leaves_no_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("app.pyz");

        write_output(b"#!python\nPK", &out, false).unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"#!python\nPK");
        let leftovers: Vec<_> = std::fs::read_dir(out.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n != "app.pyz")
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app.pyz");
        std::fs::write(&out, b"old contents that are longer").unwrap();

        write_output(b"new", &out, false).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_is_additive() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.pyz");
        let exe = dir.path().join("tool");

        write_output(b"x", &plain, false).unwrap();
        write_output(b"x", &exe, true).unwrap();

        let plain_mode = std::fs::metadata(&plain).unwrap().permissions().mode() & 0o777;
        let exe_mode = std::fs::metadata(&exe).unwrap().permissions().mode() & 0o777;
        assert_eq!(plain_mode & 0o100, 0);
        assert_eq!(exe_mode, plain_mode | 0o100);
    }

    #[cfg(unix)]
    #[test]
    fn overwriting_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("tool");
        std::fs::write(&tool, b"old").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        write_output(b"new", &tool, true).unwrap();
        let mode = std::fs::metadata(&tool).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);

        let shared = dir.path().join("shared.pyz");
        std::fs::write(&shared, b"old").unwrap();
        std::fs::set_permissions(&shared, std::fs::Permissions::from_mode(0o664)).unwrap();

        write_output(b"new", &shared, false).unwrap();
        let mode = std::fs::metadata(&shared).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
        assert_eq!(std::fs::read(&shared).unwrap(), b"new");
    }
}
