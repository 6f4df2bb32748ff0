use crate::core::models::facet::Facet;
use crate::core::models::morphology::{MorphologyEntry, MorphologySurface};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const AREA_COLUMN: &str = "% Total facet area";
pub const FACET_COLUMN: &str = "hkl";

#[derive(Debug, Error)]
pub enum MorphologyFileError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Morphology file '{path}' has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },
    #[error("Morphology file '{path}' has a facet area without an hkl label on record {record}")]
    MissingFacet { path: String, record: usize },
    #[error("Facet '{facet}' is listed more than once in morphology file '{path}'")]
    DuplicateFacet { path: String, facet: String },
    #[error("Morphology file '{path}' contains no facet with a surface area")]
    Empty { path: String },
}

#[derive(Debug, Deserialize)]
struct MorphologyRow {
    #[serde(rename = "% Total facet area")]
    percent_area: Option<f64>,
    #[serde(rename = "hkl")]
    facet: Option<String>,
}

pub fn read_surface(path: &Path) -> Result<MorphologySurface, MorphologyFileError> {
    let source = path.to_string_lossy().to_string();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| MorphologyFileError::Csv {
            path: source.clone(),
            source: e,
        })?;
    parse_surface(reader, &source)
}

/// Reads a morphology table from any reader; `source` only names it in errors.
pub fn read_surface_from(
    reader: impl Read,
    source: &str,
) -> Result<MorphologySurface, MorphologyFileError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    parse_surface(reader, source)
}

fn parse_surface<R: Read>(
    mut reader: csv::Reader<R>,
    source: &str,
) -> Result<MorphologySurface, MorphologyFileError> {
    let headers = reader.headers().map_err(|e| MorphologyFileError::Csv {
        path: source.to_string(),
        source: e,
    })?;
    for column in [AREA_COLUMN, FACET_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(MorphologyFileError::MissingColumn {
                path: source.to_string(),
                column,
            });
        }
    }

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for (index, result) in reader.deserialize::<MorphologyRow>().enumerate() {
        let row = result.map_err(|e| MorphologyFileError::Csv {
            path: source.to_string(),
            source: e,
        })?;

        let Some(percent_area) = row.percent_area.filter(|a| !a.is_nan()) else {
            continue;
        };
        let facet = row
            .facet
            .as_deref()
            .map(Facet::normalized)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| MorphologyFileError::MissingFacet {
                path: source.to_string(),
                record: index + 1,
            })?;
        if !seen.insert(facet.clone()) {
            return Err(MorphologyFileError::DuplicateFacet {
                path: source.to_string(),
                facet: facet.to_string(),
            });
        }
        entries.push(MorphologyEntry::new(facet, percent_area));
    }

    if entries.is_empty() {
        return Err(MorphologyFileError::Empty {
            path: source.to_string(),
        });
    }
    Ok(MorphologySurface::new(entries))
}
