// src/core/loader.rs

use crate::constants::MAX_CONFIG_FILE_SIZE_BYTES;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// The candidate does not exist. The caller moves on to the next one.
    #[error("Configuration file not found: '{}'.", .0.display())]
    NotFound(PathBuf),
    /// The file exists but exceeds the size limit. This aborts the run; it
    /// is not skipped in favor of a later candidate.
    #[error(
        "Configuration file is too large.\nFile: '{}'\nSize: {size} bytes\nSoftware limit: {limit} bytes",
        .path.display()
    )]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    /// The file exists but could not be read. Aborts the run.
    #[error("Could not read configuration file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// True when the caller should try the next candidate path instead of
    /// aborting.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Reads a candidate configuration file fully into memory, enforcing the
/// size limit before the read. Configuration files are a few kilobytes;
/// there is no support for large files.
pub fn slurp(path: &Path) -> Result<Vec<u8>, LoadError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(LoadError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let size = metadata.len();
    if size >= MAX_CONFIG_FILE_SIZE_BYTES {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_CONFIG_FILE_SIZE_BYTES,
        });
    }

    log::debug!("Loading configuration file '{}' ({} bytes)", path.display(), size);
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = slurp(&dir.path().join("absent.cfg")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_small_file_loads_fully() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.cfg");
        fs::write(&path, b"\xff\xfeA\0=\0").unwrap();
        assert_eq!(slurp(&path).unwrap(), b"\xff\xfeA\0=\0");
    }

    #[test]
    fn test_oversized_file_is_rejected_distinctly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.cfg");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&vec![0u8; MAX_CONFIG_FILE_SIZE_BYTES as usize + 1])
            .unwrap();
        let err = slurp(&path).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { .. }));
        assert!(!err.is_not_found());
    }
}
