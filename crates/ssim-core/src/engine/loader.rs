use super::config::{InteractionSource, UnmatchedFilePolicy};
use super::error::EngineError;
use crate::core::io::filename::{FileMetadata, parse_file_name};
use crate::core::io::interaction::read_samples;
use crate::core::io::locator::locate;
use crate::core::io::manifest::load_manifest;
use crate::core::models::morphology::CollisionProbabilityTable;
use crate::core::models::record::InteractionRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A data file ready to be loaded, with the metadata it was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub metadata: FileMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Interaction files found for a dataset, plus the ones left out under
/// [`UnmatchedFilePolicy::Skip`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSources {
    pub files: Vec<ResolvedFile>,
    pub skipped: Vec<SkippedFile>,
}

pub fn resolve_sources(
    source: &InteractionSource,
    policy: UnmatchedFilePolicy,
) -> Result<ResolvedSources, EngineError> {
    let resolved = match source {
        InteractionSource::Manifest(path) => ResolvedSources {
            files: load_manifest(path)?
                .into_iter()
                .map(|declared| ResolvedFile {
                    path: declared.path,
                    metadata: declared.metadata,
                })
                .collect(),
            skipped: Vec::new(),
        },
        InteractionSource::Pattern(pattern) => {
            let paths = locate(pattern)?;
            if paths.is_empty() {
                return Err(EngineError::NoInteractionData(format!(
                    "pattern '{}' matched no files",
                    pattern
                )));
            }
            resolve_file_names(paths, policy)?
        }
    };
    Ok(resolved)
}

fn resolve_file_names(
    paths: Vec<PathBuf>,
    policy: UnmatchedFilePolicy,
) -> Result<ResolvedSources, EngineError> {
    let mut resolved = ResolvedSources::default();
    for path in paths {
        match parse_file_name(&path) {
            Ok(metadata) => resolved.files.push(ResolvedFile { path, metadata }),
            Err(e) => match policy {
                UnmatchedFilePolicy::Strict => {
                    return Err(EngineError::FileName { path, source: e });
                }
                UnmatchedFilePolicy::Skip => {
                    warn!("Skipping {:?}: {}", path, e);
                    resolved.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }
    Ok(resolved)
}

/// Records of one data file. `probability` is `None` when the facet pair is
/// not in the collision probability table; the records then carry no
/// weighted energies.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub metadata: FileMetadata,
    pub probability: Option<f64>,
    pub records: Vec<InteractionRecord>,
}

pub fn load_interaction_file(
    path: &Path,
    metadata: FileMetadata,
    table: &CollisionProbabilityTable,
) -> Result<LoadedFile, EngineError> {
    let samples = read_samples(path)?;
    let area = metadata.area();
    let probability = table.get(&metadata.pair);

    debug!("Facets interacting: {}", metadata.pair);
    debug!("  Area used: {}", area);
    match probability {
        Some(p) => debug!("  Probability: {}", p),
        None => warn!(
            "Probability for facets {} does not exist in the morphology table ({:?}).",
            metadata.pair, path
        ),
    }

    let records = samples
        .into_iter()
        .map(|sample| {
            InteractionRecord::new(
                metadata.pair.clone(),
                sample.energies,
                area,
                probability,
                sample.placement,
            )
        })
        .collect();

    Ok(LoadedFile {
        path: path.to_path_buf(),
        metadata,
        probability,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::filename::FileNameError;
    use crate::core::models::facet::Facet;
    use crate::core::models::morphology::{MorphologyEntry, MorphologySurface};
    use std::fs;
    use tempfile::tempdir;

    const TABLE: &str = "\
Interaction Energy,Total ES Energy,Total VDW Energy,Total HB Energy
-50,-10,-40,0
-150,-30,-110,-10
";

    fn table_with(entries: &[(&str, f64)]) -> CollisionProbabilityTable {
        CollisionProbabilityTable::from_single_surface(MorphologySurface::new(
            entries
                .iter()
                .map(|(f, p)| MorphologyEntry::new(Facet::from(*f), *p))
                .collect(),
        ))
    }

    #[test]
    fn load_normalizes_and_weights_energies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LGA_(1-1-1)vs(0-0-1)_50_80.csv");
        fs::write(&path, TABLE).unwrap();

        let metadata = parse_file_name(&path).unwrap();
        let table = CollisionProbabilityTable::from_surfaces(
            MorphologySurface::new(vec![MorphologyEntry::new(Facet::from("1-1-1"), 60.0)]),
            MorphologySurface::new(vec![MorphologyEntry::new(Facet::from("0-0-1"), 50.0)]),
        );

        let loaded = load_interaction_file(&path, metadata, &table).unwrap();

        assert!((loaded.probability.unwrap() - 0.3).abs() < 1e-12);
        let totals: Vec<f64> = loaded.records.iter().map(|r| r.normalized.total).collect();
        assert!((totals[0] - -694.769).abs() < 1e-9);
        assert!((totals[1] - -2084.307).abs() < 1e-9);
        let weighted: Vec<f64> = loaded
            .records
            .iter()
            .map(|r| r.weighted.unwrap().total)
            .collect();
        assert!((weighted[0] - -208.4307).abs() < 1e-9);
        assert!((weighted[1] - -625.2921).abs() < 1e-9);
        assert!(loaded.records.iter().all(|r| r.facet.label() == "1-1-1/0-0-1"));
    }

    #[test]
    fn missing_probability_keeps_records_without_weights() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LGA_(011)vs(200)_20_20.csv");
        fs::write(&path, TABLE).unwrap();

        let metadata = parse_file_name(&path).unwrap();
        let loaded =
            load_interaction_file(&path, metadata, &table_with(&[("011", 100.0)])).unwrap();

        assert_eq!(loaded.probability, None);
        assert_eq!(loaded.records.len(), 2);
        assert!(loaded.records.iter().all(|r| r.weighted.is_none()));
    }

    #[test]
    fn unreadable_file_is_an_error_not_a_missing_probability() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LGA_(011)vs(011)_20_20.csv");
        fs::write(&path, "Interaction Energy\n-1\n").unwrap();

        let metadata = parse_file_name(&path).unwrap();
        let result = load_interaction_file(&path, metadata, &table_with(&[("011", 100.0)]));
        assert!(matches!(result, Err(EngineError::InteractionFile(_))));
    }

    #[test]
    fn strict_policy_rejects_unmatched_file_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("LGA_(011)vs(011)_20_20.csv"), TABLE).unwrap();
        fs::write(dir.path().join("LGA_summary.csv"), TABLE).unwrap();

        let source = InteractionSource::Pattern(format!("{}/LGA*.csv", dir.path().display()));
        let result = resolve_sources(&source, UnmatchedFilePolicy::Strict);
        assert!(matches!(
            result,
            Err(EngineError::FileName {
                source: FileNameError::MissingFacets(_),
                ..
            })
        ));
    }

    #[test]
    fn skip_policy_reports_unmatched_file_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("LGA_(011)vs(011)_20_20.csv"), TABLE).unwrap();
        fs::write(dir.path().join("LGA_summary.csv"), TABLE).unwrap();

        let source = InteractionSource::Pattern(format!("{}/LGA*.csv", dir.path().display()));
        let resolved = resolve_sources(&source, UnmatchedFilePolicy::Skip).unwrap();

        assert_eq!(resolved.files.len(), 1);
        assert_eq!(resolved.files[0].metadata.pair.label(), "011/011");
        assert_eq!(resolved.skipped.len(), 1);
        assert!(resolved.skipped[0].path.ends_with("LGA_summary.csv"));
    }

    #[test]
    fn pattern_without_matches_is_no_interaction_data() {
        let dir = tempdir().unwrap();
        let source = InteractionSource::Pattern(format!("{}/*.csv", dir.path().display()));
        assert!(matches!(
            resolve_sources(&source, UnmatchedFilePolicy::Strict),
            Err(EngineError::NoInteractionData(_))
        ));
    }

    #[test]
    fn manifest_source_uses_declared_metadata() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("manifest.toml");
        fs::write(
            &manifest,
            r#"
            [[file]]
            path = "run-01.csv"
            first-facet = "011"
            second-facet = "002"
            first-size = 30
            second-size = 40
            "#,
        )
        .unwrap();

        let resolved = resolve_sources(
            &InteractionSource::Manifest(manifest),
            UnmatchedFilePolicy::Strict,
        )
        .unwrap();
        assert_eq!(resolved.files.len(), 1);
        assert_eq!(resolved.files[0].path, dir.path().join("run-01.csv"));
        assert_eq!(resolved.files[0].metadata.area(), 30.0);
    }
}
