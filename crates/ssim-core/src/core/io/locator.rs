use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Cannot read a path matched by '{pattern}': {source}")]
    Access {
        pattern: String,
        source: glob::GlobError,
    },
}

/// Expands a glob pattern (`**` recurses into sub-directories) to the regular
/// files it matches, sorted by path and without duplicates.
pub fn locate(pattern: &str) -> Result<Vec<PathBuf>, LocateError> {
    let entries = glob::glob(pattern).map_err(|e| LocateError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LocateError::Access {
            pattern: pattern.to_string(),
            source: e,
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files.dedup();

    debug!("Pattern '{}' matched {} file(s).", pattern, files.len());
    Ok(files)
}
