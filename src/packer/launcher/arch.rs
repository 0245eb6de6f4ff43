//! Interpreter word-width detection.

use std::path::{Path, PathBuf};

use crate::packer::error::{Error, ErrorExt, Result};

/// Pointer width of an interpreter binary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WordWidth {
    /// 32-bit image (PE32, ELFCLASS32, 32-bit Mach-O).
    Bits32,
    /// 64-bit image (PE32+, ELFCLASS64, 64-bit or fat Mach-O).
    Bits64,
}

impl WordWidth {
    /// Returns `"32"` or `"64"`, as used in launcher resource names.
    pub fn as_str(self) -> &'static str {
        match self {
            WordWidth::Bits32 => "32",
            WordWidth::Bits64 => "64",
        }
    }
}

/// Locates the interpreter binary.
///
/// Bare command names such as `python3` are looked up on `PATH`; anything
/// containing a path separator is taken as-is.
pub fn locate_interpreter(interpreter: &str) -> Result<PathBuf> {
    let path = Path::new(interpreter);
    if path.components().count() > 1 || path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    which::which(interpreter).map_err(|e| Error::InterpreterInspection {
        path: path.to_path_buf(),
        reason: format!("not found on PATH: {e}"),
    })
}

/// Determines the word width of an interpreter by parsing its executable image.
pub fn detect_word_width(interpreter: &Path) -> Result<WordWidth> {
    let buffer = std::fs::read(interpreter).fs_context("reading interpreter binary", interpreter)?;
    word_width_of(&buffer).map_err(|reason| Error::InterpreterInspection {
        path: interpreter.to_path_buf(),
        reason,
    })
}

fn word_width_of(buffer: &[u8]) -> std::result::Result<WordWidth, String> {
    let object = goblin::Object::parse(buffer)
        .map_err(|e| format!("failed to parse binary with goblin: {e}"))?;

    let is_64 = match object {
        goblin::Object::PE(pe) => pe.is_64,
        goblin::Object::Elf(elf) => elf.is_64,
        goblin::Object::Mach(goblin::mach::Mach::Binary(macho)) => macho.is_64,
        // fat images are treated as 64-bit
        goblin::Object::Mach(goblin::mach::Mach::Fat(_)) => true,
        _ => return Err("not a PE, ELF or Mach-O executable".to_string()),
    };

    Ok(if is_64 {
        WordWidth::Bits64
    } else {
        WordWidth::Bits32
    })
}
