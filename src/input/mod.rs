use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod labels;
pub mod reader;

pub use labels::load_labels;
pub use reader::read_lines;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub fn require_file(path: &Path, what: &str) -> Result<(), InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "{what} '{}' does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(InputError::InvalidInput(format!(
            "{what} '{}' is not a regular file",
            path.display()
        )));
    }
    Ok(())
}

/// Directory an output file will be created in (`.` for bare file names).
pub fn output_parent(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn check_output_dir(dir: &Path) -> Result<(), InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "output directory '{}' does not exist",
            dir.display()
        )));
    }
    // The scratch file is removed when dropped.
    match tempfile::Builder::new()
        .prefix(".kira-kofam-")
        .tempfile_in(dir)
    {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(InputError::InvalidInput(format!(
                "no write permission in output directory '{}'",
                dir.display()
            )))
        }
        Err(e) => Err(InputError::Io(e)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
