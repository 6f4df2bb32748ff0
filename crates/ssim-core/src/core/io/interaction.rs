use crate::core::models::energy::{EnergyComponent, EnergyComponents};
use crate::core::models::record::Placement;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const X_DISPLACEMENT_COLUMN: &str = "X axis Displacement";
pub const Y_DISPLACEMENT_COLUMN: &str = "Y axis Displacement";
pub const ROTATION_COLUMN: &str = "Rotation";

#[derive(Debug, Error)]
pub enum InteractionFileError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Interaction file '{path}' has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },
}

/// One row of an interaction data file, before area normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSample {
    pub energies: EnergyComponents,
    pub placement: Option<Placement>,
}

#[derive(Debug, Deserialize)]
struct InteractionRow {
    #[serde(rename = "Interaction Energy")]
    total: f64,
    #[serde(rename = "Total ES Energy")]
    electrostatic: f64,
    #[serde(rename = "Total VDW Energy")]
    van_der_waals: f64,
    #[serde(rename = "Total HB Energy")]
    hydrogen_bond: f64,
    #[serde(rename = "X axis Displacement", default)]
    x_displacement: Option<f64>,
    #[serde(rename = "Y axis Displacement", default)]
    y_displacement: Option<f64>,
    #[serde(rename = "Rotation", default)]
    rotation: Option<f64>,
}

impl From<InteractionRow> for InteractionSample {
    fn from(row: InteractionRow) -> Self {
        let placement = match (row.x_displacement, row.y_displacement, row.rotation) {
            (Some(x_displacement), Some(y_displacement), Some(rotation)) => Some(Placement {
                x_displacement,
                y_displacement,
                rotation,
            }),
            _ => None,
        };
        Self {
            energies: EnergyComponents::new(
                row.total,
                row.electrostatic,
                row.van_der_waals,
                row.hydrogen_bond,
            ),
            placement,
        }
    }
}

pub fn read_samples(path: &Path) -> Result<Vec<InteractionSample>, InteractionFileError> {
    let source = path.to_string_lossy().to_string();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| InteractionFileError::Csv {
            path: source.clone(),
            source: e,
        })?;
    parse_samples(reader, &source)
}

/// Reads interaction samples from any reader; `source` only names it in errors.
pub fn read_samples_from(
    reader: impl Read,
    source: &str,
) -> Result<Vec<InteractionSample>, InteractionFileError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    parse_samples(reader, source)
}

fn parse_samples<R: Read>(
    mut reader: csv::Reader<R>,
    source: &str,
) -> Result<Vec<InteractionSample>, InteractionFileError> {
    let headers = reader.headers().map_err(|e| InteractionFileError::Csv {
        path: source.to_string(),
        source: e,
    })?;
    for component in EnergyComponent::ALL {
        let column = component.raw_column();
        if !headers.iter().any(|h| h == column) {
            return Err(InteractionFileError::MissingColumn {
                path: source.to_string(),
                column,
            });
        }
    }

    reader
        .deserialize::<InteractionRow>()
        .map(|result| {
            result
                .map(InteractionSample::from)
                .map_err(|e| InteractionFileError::Csv {
                    path: source.to_string(),
                    source: e,
                })
        })
        .collect()
}
