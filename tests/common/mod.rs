//! Shared fixtures for CLI tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project with `pyproject.toml` and an installed library tree.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Creates a project named `My-Project` declaring the given scripts.
    pub fn new(scripts: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create project dir");
        let mut pyproject = String::from("[project]\nname = \"My-Project\"\nversion = \"0.1.0\"\n");
        if !scripts.is_empty() {
            pyproject.push_str("\n[project.scripts]\n");
            for (name, target) in scripts {
                pyproject.push_str(&format!("{name} = \"{target}\"\n"));
            }
        }
        std::fs::write(dir.path().join("pyproject.toml"), pyproject).expect("write pyproject");

        let project = Self { dir };
        project.write_lib("app/__init__.py", "");
        project.write_lib(
            "app/cli.py",
            "def main():\n    print('main called')\n\ndef other():\n    print('other called')\n",
        );
        project.write_lib("app/__pycache__/cli.cpython-311.pyc", "bytecode");
        project.write_lib("app-0.1.0.dist-info/METADATA", "Name: My-Project\n");
        project.write_lib("app-0.1.0.dist-info/RECORD", "");
        project.write_lib("app.egg-link", "/src/app\n");
        project
    }

    /// Project root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Installed library directory.
    pub fn lib(&self) -> PathBuf {
        self.dir.path().join("lib")
    }

    /// Writes a file under the library directory.
    pub fn write_lib(&self, relative: &str, contents: &str) {
        let path = self.lib().join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create lib dirs");
        std::fs::write(path, contents).expect("write lib file");
    }

    /// `pack` command running in the project root with `--lib` set.
    pub fn pack(&self) -> Command {
        let mut cmd = Command::cargo_bin("kodegen_bundler_zipapp").expect("binary built");
        cmd.current_dir(self.path())
            .env_remove("KODEGEN_ZIPAPP_LIB")
            .env_remove("KODEGEN_ZIPAPP_LAUNCHER_DIR")
            .arg("pack")
            .arg("--lib")
            .arg(self.lib());
        cmd
    }
}

/// Splits a zipapp into its directive line and opens its container.
pub fn open_zipapp(path: &Path) -> (String, zip::ZipArchive<Cursor<Vec<u8>>>) {
    let bytes = std::fs::read(path).expect("read zipapp");
    let newline = bytes.iter().position(|b| *b == b'\n').expect("directive line");
    let directive = String::from_utf8_lossy(&bytes[..newline]).into_owned();
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip container");
    (directive, archive)
}

/// Member names of a zip container.
pub fn member_names(archive: &zip::ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    archive.file_names().map(String::from).collect()
}
