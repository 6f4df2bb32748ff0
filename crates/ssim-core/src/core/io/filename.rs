use crate::core::models::facet::{Facet, FacetPair};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

static FACET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([0-9\-]+)\)\S*\(([0-9\-]+)\)").expect("facet pattern is a valid regex")
});

/// Facet pair and crystallite sizes of one interaction data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub pair: FacetPair,
    pub first_size: u32,
    pub second_size: u32,
}

impl FileMetadata {
    pub fn new(pair: FacetPair, first_size: u32, second_size: u32) -> Self {
        Self {
            pair,
            first_size,
            second_size,
        }
    }

    /// Contact area used for normalization: the smaller of the two sizes, so
    /// that the overlap is not counted twice.
    pub fn area(&self) -> f64 {
        f64::from(self.first_size.min(self.second_size))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileNameError {
    #[error("File name '{0}' does not contain two parenthesized facet indices such as '(1-1-1)vs(0-0-1)'")]
    MissingFacets(String),
    #[error("File name '{0}' does not contain two underscore-delimited crystallite sizes such as '_50_80'")]
    MissingSizes(String),
    #[error("File name '{0}' encodes a crystallite size of zero")]
    ZeroSize(String),
}

/// Recovers facet indices and crystallite sizes encoded in a data file name.
///
/// The facets are the first and last parenthesized groups of digits and minus
/// signs. The sizes are the first and last integer tokens of the stem that
/// follow an underscore, e.g. `LGA_(1-1-1)vs(0-0-1)_50_80.csv`.
pub fn parse_file_name(path: &Path) -> Result<FileMetadata, FileNameError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let captures = FACET_PATTERN
        .captures(&name)
        .ok_or_else(|| FileNameError::MissingFacets(name.clone()))?;
    let pair = FacetPair::new(
        Facet::normalized(&captures[1]),
        Facet::normalized(&captures[2]),
    );

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let sizes: Vec<u32> = stem
        .split('_')
        .skip(1)
        .filter_map(|token| token.parse::<u32>().ok())
        .collect();
    let (first_size, second_size) = match sizes.as_slice() {
        [first, .., last] => (*first, *last),
        _ => return Err(FileNameError::MissingSizes(name)),
    };
    if first_size == 0 || second_size == 0 {
        return Err(FileNameError::ZeroSize(name));
    }

    Ok(FileMetadata::new(pair, first_size, second_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_facets_and_adjacent_sizes() {
        let meta = parse_file_name(Path::new("data/LGA_(1-1-1)vs(0-0-1)_50_80.csv")).unwrap();
        assert_eq!(meta.pair.label(), "1-1-1/0-0-1");
        assert_eq!(meta.first_size, 50);
        assert_eq!(meta.second_size, 80);
        assert_eq!(meta.area(), 50.0);
    }

    #[test]
    fn sizes_are_first_and_last_integer_tokens() {
        let meta = parse_file_name(Path::new("(011)vs(10-1)_80_run_3_40_final.csv")).unwrap();
        assert_eq!((meta.first_size, meta.second_size), (80, 40));
        assert_eq!(meta.area(), 40.0);
    }

    #[test]
    fn directory_names_do_not_affect_parsing() {
        let path: PathBuf = ["runs_(9)_7", "API_(002)(011)_30_30.csv"].iter().collect();
        let meta = parse_file_name(&path).unwrap();
        assert_eq!(meta.pair.label(), "002/011");
        assert_eq!(meta.area(), 30.0);
    }

    #[test]
    fn missing_facets_is_reported() {
        let result = parse_file_name(Path::new("LGA_Morphology_50_80.csv"));
        assert_eq!(
            result,
            Err(FileNameError::MissingFacets(
                "LGA_Morphology_50_80.csv".to_string()
            ))
        );
    }

    #[test]
    fn single_size_is_reported() {
        let result = parse_file_name(Path::new("LGA_(011)vs(011)_50.csv"));
        assert!(matches!(result, Err(FileNameError::MissingSizes(_))));
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = parse_file_name(Path::new("LGA_(011)vs(011)_0_50.csv"));
        assert!(matches!(result, Err(FileNameError::ZeroSize(_))));
    }
}
