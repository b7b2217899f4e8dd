// src/core/locator.rs

use crate::constants::{CONFIG_FILE_EXTENSION, CONFIG_SEARCH_DIRS};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Could not determine the wrapper's own file name from '{}'.", .0.display())]
    NoFileName(PathBuf),
}

/// Produces the ordered list of configuration-file candidates for a wrapper
/// binary, each named after the wrapper's file stem with the `.cfg`
/// extension:
///
/// - `<dir>/configs/<base>.cfg`
/// - `<dir>/config/<base>.cfg`
/// - `<dir>/<base>.cfg`
///
/// The first candidate that exists and loads wins; the caller tries them in
/// order.
pub fn candidate_paths(wrapper_path: &Path) -> Result<Vec<PathBuf>, LocateError> {
    let stem = wrapper_path
        .file_stem()
        .ok_or_else(|| LocateError::NoFileName(wrapper_path.to_path_buf()))?;

    let dir = wrapper_path.parent().unwrap_or_else(|| Path::new("."));
    let filename = PathBuf::from(stem).with_extension(CONFIG_FILE_EXTENSION);

    let candidates = CONFIG_SEARCH_DIRS
        .iter()
        .map(|subdir| {
            if subdir.is_empty() {
                dir.join(&filename)
            } else {
                dir.join(subdir).join(&filename)
            }
        })
        .collect();

    Ok(candidates)
}

// MARK: --- UNIT TESTS ---
