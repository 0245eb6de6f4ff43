//! Project metadata from `pyproject.toml` and interpreter discovery

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::error::{CliError, Result, ZipappError};
use crate::packer::ProjectInfo;

/// File PDM writes the selected interpreter path into.
const PDM_PYTHON_FILE: &str = ".pdm-python";

/// Interpreter commands tried on `PATH`, in order.
const FALLBACK_INTERPRETERS: [&str; 2] = ["python3", "python"];

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    project: Option<ProjectTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    name: Option<String>,
    #[serde(default)]
    scripts: IndexMap<String, String>,
}

/// Loads the project name and declared scripts from `<root>/pyproject.toml`.
///
/// Scripts keep their declaration order. A missing `[project] name` falls
/// back to the name of the project directory.
pub fn load_project(root: &Path) -> Result<ProjectInfo> {
    let manifest_path = root.join("pyproject.toml");
    let manifest = std::fs::read_to_string(&manifest_path).map_err(|e| {
        ZipappError::Cli(CliError::ExecutionFailed {
            command: "read_pyproject".to_string(),
            reason: format!("Failed to read {}: {}", manifest_path.display(), e),
        })
    })?;

    let pyproject: PyProject = toml::from_str(&manifest)?;
    let table = pyproject.project.unwrap_or_default();

    let name = match table.name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => {
            let dir_name = root
                .canonicalize()?
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ZipappError::Cli(CliError::InvalidArguments {
                        reason: format!("Cannot derive a project name from {}", root.display()),
                    })
                })?;
            log::warn!("No [project] name in {}, using {dir_name:?}", manifest_path.display());
            dir_name
        }
    };

    log::debug!("Project {name:?} declares {} script(s)", table.scripts.len());

    Ok(ProjectInfo {
        name,
        scripts: table.scripts,
    })
}

/// Finds the interpreter configured for the project.
///
/// Uses the path recorded in `.pdm-python` when present, otherwise the first
/// of `python3`, `python` found on `PATH`.
pub fn default_interpreter(root: &Path) -> Result<String> {
    let pinned = root.join(PDM_PYTHON_FILE);
    if pinned.is_file() {
        let recorded = std::fs::read_to_string(&pinned)?;
        let recorded = recorded.trim();
        if !recorded.is_empty() {
            log::debug!("Using interpreter from {}: {recorded}", pinned.display());
            return Ok(recorded.to_string());
        }
    }

    for candidate in FALLBACK_INTERPRETERS {
        if let Ok(path) = which::which(candidate) {
            log::debug!("Using interpreter found on PATH: {}", path.display());
            return Ok(path.to_string_lossy().into_owned());
        }
    }

    Err(ZipappError::Cli(CliError::MissingArgument {
        argument: "--interpreter (no Python interpreter configured or found on PATH)".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_name_and_scripts_in_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pyproject.toml"),
            r#"
[project]
name = "My-Project"
version = "0.1.0"

[project.scripts]
zed = "pkg.mod:zed_main"
a = "pkg.mod:a_main"
b = "pkg.mod:b_main"
"#,
        )
        .unwrap();

        let project = load_project(dir.path()).unwrap();
        assert_eq!(project.name, "My-Project");
        let keys: Vec<_> = project.scripts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zed", "a", "b"]);
        assert_eq!(project.scripts["zed"], "pkg.mod:zed_main");
    }

    #[test]
    fn missing_name_falls_back_to_directory() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("cool-tool");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("pyproject.toml"), "[tool.pdm]\n").unwrap();

        let project = load_project(&root).unwrap();
        assert_eq!(project.name, "cool-tool");
        assert!(project.scripts.is_empty());
    }

    #[test]
    fn missing_pyproject_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_project(dir.path()),
            Err(ZipappError::Cli(CliError::ExecutionFailed { .. }))
        ));
    }

    #[test]
    fn malformed_pyproject_is_a_toml_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project\nname=").unwrap();
        assert!(matches!(load_project(dir.path()), Err(ZipappError::Toml(_))));
    }

    #[test]
    fn pinned_interpreter_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PDM_PYTHON_FILE), "/opt/py/bin/python3.11\n").unwrap();
        assert_eq!(default_interpreter(dir.path()).unwrap(), "/opt/py/bin/python3.11");
    }
}
