use crate::core::models::morphology::CollisionProbabilityTable;
use crate::engine::config::DatasetConfig;
use crate::engine::dataset::{InteractionDataset, LoadReport, MissingProbability};
use crate::engine::error::EngineError;
use crate::engine::loader::{LoadedFile, ResolvedFile, load_interaction_file, resolve_sources};
use crate::engine::morphology::extract_probabilities;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Everything one dataset analysis produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub name: String,
    pub probabilities: CollisionProbabilityTable,
    pub dataset: InteractionDataset,
    pub report: LoadReport,
}

#[instrument(skip_all, name = "analysis_workflow", fields(dataset = %config.name))]
pub fn run(config: &DatasetConfig, reporter: &ProgressReporter) -> Result<Analysis, EngineError> {
    // === Phase 1: Collision probabilities ===
    reporter.report(Progress::PhaseStart { name: "Morphology" });
    info!("Extracting collision probabilities from '{}'.", config.morphology_pattern);
    let probabilities = extract_probabilities(&config.morphology_pattern)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Interaction file discovery ===
    reporter.report(Progress::PhaseStart {
        name: "Locating interaction files",
    });
    let sources = resolve_sources(&config.interactions, config.unmatched_files)?;
    for skipped in &sources.skipped {
        reporter.report(Progress::FileSkipped {
            file: skipped.path.display().to_string(),
            reason: skipped.reason.clone(),
        });
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Loading and aggregation ===
    let mut report = LoadReport {
        skipped: sources.skipped,
        ..LoadReport::default()
    };
    let loaded = load_files(sources.files, &probabilities, &mut report, reporter)?;
    let dataset = InteractionDataset::from_files(loaded)?;

    info!(
        "Number of facet combinations: {}",
        dataset.facet_labels().len()
    );
    info!(
        "Loaded {} record(s) from {} file(s); {} skipped, {} without probability.",
        dataset.len(),
        report.loaded.len(),
        report.skipped.len(),
        report.missing_probabilities.len()
    );

    Ok(Analysis {
        name: config.name.clone(),
        probabilities,
        dataset,
        report,
    })
}

fn load_files(
    files: Vec<ResolvedFile>,
    probabilities: &CollisionProbabilityTable,
    report: &mut LoadReport,
    reporter: &ProgressReporter,
) -> Result<Vec<LoadedFile>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading interaction files",
    });
    reporter.report(Progress::FilesFound {
        total: files.len() as u64,
    });

    let mut loaded = Vec::with_capacity(files.len());
    for file in files {
        let result = load_interaction_file(&file.path, file.metadata, probabilities)?;
        if result.probability.is_none() {
            reporter.report(Progress::Message(format!(
                "No collision probability for {}; weighted energies omitted.",
                result.metadata.pair
            )));
            report.missing_probabilities.push(MissingProbability {
                path: result.path.clone(),
                pair: result.metadata.pair.clone(),
            });
        }
        report.loaded.push(result.path.clone());
        reporter.report(Progress::FileLoaded {
            file: result.path.display().to_string(),
        });
        loaded.push(result);
    }

    reporter.report(Progress::FilesFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(loaded)
}
