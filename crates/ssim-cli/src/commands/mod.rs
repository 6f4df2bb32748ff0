pub mod cab;
pub mod distribution;
pub mod heatmap;
pub mod summary;
pub mod violin;

use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ssim_core::engine::progress::ProgressReporter;
use ssim_core::workflows::analyse::{self, Analysis};
use tracing::{info, warn};

/// Runs the analysis workflow for one declared dataset with a progress bar,
/// then prints what the load report flagged.
pub fn load_analysis(config: &AppConfig, name: &str) -> Result<Analysis> {
    let dataset_config = config.dataset(name)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Loading dataset '{}'...", name);
    info!("Invoking the analysis workflow for dataset '{}'.", name);
    let analysis = analyse::run(&dataset_config, &reporter)?;

    let report = &analysis.report;
    if !report.skipped.is_empty() {
        println!(
            "Warning: {} file(s) of '{}' were skipped:",
            report.skipped.len(),
            name
        );
        for skipped in &report.skipped {
            println!("  {} ({})", skipped.path.display(), skipped.reason);
        }
    }
    if !report.missing_probabilities.is_empty() {
        warn!(
            "{} file(s) of '{}' have no collision probability; their weighted energies are absent.",
            report.missing_probabilities.len(),
            name
        );
        println!(
            "Warning: no collision probability for {} file(s) of '{}':",
            report.missing_probabilities.len(),
            name
        );
        for missing in &report.missing_probabilities {
            println!("  {} ({})", missing.path.display(), missing.pair);
        }
    }

    println!(
        "✓ '{}': {} record(s) from {} file(s), {} facet combination(s).",
        name,
        analysis.dataset.len(),
        report.loaded.len(),
        analysis.dataset.facet_labels().len()
    );
    Ok(analysis)
}

/// `(start, end)` of an axis from optional overrides and a default range.
pub fn axis_range(min: Option<f64>, max: Option<f64>, default: (f64, f64)) -> (f64, f64) {
    (min.unwrap_or(default.0), max.unwrap_or(default.1))
}
