use super::error::EngineError;
use crate::core::io::locator::locate;
use crate::core::io::morphology::read_surface;
use crate::core::models::morphology::{CollisionProbabilityTable, MorphologySurface};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const FRACTION_TOLERANCE: f64 = 0.01;

/// Builds the collision probability table from the morphology files matched by `pattern`.
pub fn extract_probabilities(pattern: &str) -> Result<CollisionProbabilityTable, EngineError> {
    let files = locate(pattern)?;
    if !(1..=2).contains(&files.len()) {
        return Err(EngineError::AmbiguousMorphologySource {
            pattern: pattern.to_string(),
            found: files.len(),
        });
    }
    probabilities_from_files(&files)
}

/// One file is the self-interaction case and is used on both axes; two files
/// give the first (A) and second (B) axis in that order.
pub fn probabilities_from_files(
    files: &[PathBuf],
) -> Result<CollisionProbabilityTable, EngineError> {
    let table = match files {
        [single] => {
            info!("Using morphology {:?} for both surfaces.", single);
            CollisionProbabilityTable::from_single_surface(load_surface(single)?)
        }
        [first, second] => {
            info!(
                "Using morphologies {:?} (first facet) and {:?} (second facet).",
                first, second
            );
            CollisionProbabilityTable::from_surfaces(load_surface(first)?, load_surface(second)?)
        }
        _ => {
            return Err(EngineError::AmbiguousMorphologySource {
                pattern: "<explicit file list>".to_string(),
                found: files.len(),
            });
        }
    };
    debug!("Collision probability table has {} entries.", table.len());
    Ok(table)
}

fn load_surface(path: &Path) -> Result<MorphologySurface, EngineError> {
    let surface = read_surface(path)?;
    let total = surface.total_fraction();
    if (total - 1.0).abs() > FRACTION_TOLERANCE {
        warn!(
            "Facet areas in {:?} sum to {:.2}% rather than 100%.",
            path,
            total * 100.0
        );
    }
    for entry in surface.entries() {
        debug!("  {:<10} {:>7.3}%", entry.facet.as_str(), entry.percent_area);
    }
    Ok(surface)
}
