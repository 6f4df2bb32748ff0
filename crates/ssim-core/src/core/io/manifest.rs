use super::filename::FileMetadata;
use crate::core::models::facet::{Facet, FacetPair};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Manifest entry for '{file}' has an empty facet")]
    EmptyFacet { file: String },
    #[error("Manifest entry for '{file}' declares a crystallite size of zero")]
    ZeroSize { file: String },
    #[error("Manifest '{path}' declares no files")]
    Empty { path: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default, rename = "file")]
    files: Vec<RawManifestEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawManifestEntry {
    path: PathBuf,
    first_facet: String,
    second_facet: String,
    first_size: u32,
    second_size: u32,
}

/// A data file whose facet pair and sizes are declared rather than parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredFile {
    pub path: PathBuf,
    pub metadata: FileMetadata,
}

/// Loads a manifest of the form
///
/// ```toml
/// [[file]]
/// path = "LGA/run-01.csv"
/// first-facet = "1-1-1"
/// second-facet = "0-0-1"
/// first-size = 50
/// second-size = 80
/// ```
///
/// Relative paths are resolved against the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Vec<DeclaredFile>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let source = path.to_string_lossy().to_string();
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let files = parse_manifest(&content, base, &source)?;
    if files.is_empty() {
        return Err(ManifestError::Empty { path: source });
    }
    Ok(files)
}

fn parse_manifest(
    content: &str,
    base: &Path,
    source: &str,
) -> Result<Vec<DeclaredFile>, ManifestError> {
    let raw: RawManifest = toml::from_str(content).map_err(|e| ManifestError::Toml {
        path: source.to_string(),
        source: e,
    })?;

    raw.files
        .into_iter()
        .map(|entry| {
            let file = entry.path.to_string_lossy().to_string();
            let first = Facet::normalized(&entry.first_facet);
            let second = Facet::normalized(&entry.second_facet);
            if first.is_empty() || second.is_empty() {
                return Err(ManifestError::EmptyFacet { file });
            }
            if entry.first_size == 0 || entry.second_size == 0 {
                return Err(ManifestError::ZeroSize { file });
            }
            let path = if entry.path.is_absolute() {
                entry.path
            } else {
                base.join(entry.path)
            };
            Ok(DeclaredFile {
                path,
                metadata: FileMetadata::new(
                    FacetPair::new(first, second),
                    entry.first_size,
                    entry.second_size,
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"
        [[file]]
        path = "runs/first.csv"
        first-facet = "(1-1-1)"
        second-facet = "0-0-1"
        first-size = 50
        second-size = 80

        [[file]]
        path = "/abs/second.csv"
        first-facet = "{0 1 1}"
        second-facet = "011"
        first-size = 20
        second-size = 20
    "#;

    #[test]
    fn parse_manifest_resolves_relative_paths_and_normalizes_facets() {
        let files = parse_manifest(MANIFEST, Path::new("/data"), "test").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, Path::new("/data/runs/first.csv"));
        assert_eq!(files[0].metadata.pair.label(), "1-1-1/0-0-1");
        assert_eq!(files[0].metadata.area(), 50.0);
        assert_eq!(files[1].metadata.pair.label(), "011/011");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let files = parse_manifest(MANIFEST, Path::new("/data"), "test").unwrap();
        if cfg!(unix) {
            assert_eq!(files[1].path, Path::new("/abs/second.csv"));
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let content = r#"
            [[file]]
            path = "a.csv"
            first-facet = "011"
            second-facet = "011"
            first-size = 1
            second-size = 1
            probability = 0.5
        "#;
        let result = parse_manifest(content, Path::new(""), "test");
        assert!(matches!(result, Err(ManifestError::Toml { .. })));
    }

    #[test]
    fn zero_size_is_rejected() {
        let content = r#"
            [[file]]
            path = "a.csv"
            first-facet = "011"
            second-facet = "011"
            first-size = 0
            second-size = 1
        "#;
        let result = parse_manifest(content, Path::new(""), "test");
        assert!(matches!(result, Err(ManifestError::ZeroSize { .. })));
    }

    #[test]
    fn load_manifest_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.toml");
        fs::write(&path, MANIFEST).unwrap();

        let files = load_manifest(&path).unwrap();
        assert_eq!(files[0].path, dir.path().join("runs/first.csv"));
    }

    #[test]
    fn load_manifest_fails_for_empty_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.toml");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            load_manifest(&path),
            Err(ManifestError::Empty { .. })
        ));
    }

    #[test]
    fn load_manifest_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_manifest(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }
}
