use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{ConfigError, Result};

/// Check that `path` names a file whose directory exists and is writable.
/// A bare file name is checked against the current directory.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(ConfigError::OutputPath(format!(
            "the path {} is a directory - please choose another path",
            path.display()
        ))
        .into());
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().map_err(|_| {
            ConfigError::OutputPath("unable to detect the current working directory".to_string())
        })?,
    };
    validate_directory(&dir)
}

fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(ConfigError::OutputPath(format!(
            "the path {} does not exist - please choose another path",
            dir.display()
        ))
        .into());
    }

    let check = write_check_path(dir);
    let writable = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&check)
        .is_ok();
    if writable {
        let _ = std::fs::remove_file(&check);
    }
    debug!("{} writable: {}", dir.display(), writable);

    if !writable {
        return Err(ConfigError::OutputPath(format!(
            "the path {} is not writable - please choose another path",
            dir.display()
        ))
        .into());
    }
    Ok(())
}

fn write_check_path(dir: &Path) -> PathBuf {
    dir.join(format!(".dfimage-write-check-{}", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writable_directory() {
        let dir = TempDir::new().unwrap();
        assert!(validate_output_path(&dir.path().join("Dockerfile")).is_ok());
        assert!(!write_check_path(dir.path()).exists());
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nope").join("Dockerfile");
        let err = validate_output_path(&target).unwrap_err();
        assert!(err.user_message().contains("does not exist"));
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = validate_output_path(dir.path()).unwrap_err();
        assert!(err.user_message().contains("is a directory"));
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();

        let err = validate_output_path(&file.join("Dockerfile")).unwrap_err();
        assert!(err.user_message().starts_with("the path"));
    }
}
