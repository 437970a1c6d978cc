use std::fs::read_dir;
use std::path::{Path, PathBuf};

use crate::error::{Result, SangerError};

///
/// Pick the file in `directory` whose name contains `query`.
///
/// When several names match, the lexicographically smallest path wins. That
/// is a deterministic tie-break only; it says nothing about which file is
/// the right one.
///
/// # Arguments
/// - query: substring to look for in entry names
/// - directory: directory to list (not recursed)
///
pub fn find_best_match<P: AsRef<Path>>(query: &str, directory: P) -> Result<PathBuf> {
    let directory = directory.as_ref();

    let mut matches: Vec<PathBuf> = read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(query))
        .map(|entry| entry.path())
        .collect();

    if matches.len() > 1 {
        log::debug!(
            "{} files in {} match '{}', taking the first",
            matches.len(),
            directory.display(),
            query
        );
    }

    matches.sort();
    matches
        .into_iter()
        .next()
        .ok_or_else(|| SangerError::NoMatchFound {
            query: query.to_string(),
            directory: directory.to_path_buf(),
        })
}
