use crate::cli::HeatmapArgs;
use crate::commands::load_analysis;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use ssim_core::plots::heatmap::{HeatmapParams, draw_heatmap};
use ssim_core::plots::render_svg;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: HeatmapArgs, config: &AppConfig) -> Result<()> {
    let analysis = load_analysis(config, &args.dataset)?;

    let rotations = match args.rotations.rotation {
        Some(rotation) => vec![rotation],
        None => analysis.dataset.rotations(&args.facet),
    };
    if rotations.is_empty() {
        return Err(CliError::Argument(format!(
            "facet pair '{}' has no records in dataset '{}'",
            args.facet, args.dataset
        )));
    }

    let per_frame = args.rotations.all_rotations;
    for rotation in rotations {
        let params = HeatmapParams {
            column: args.column,
            facet: args.facet.clone(),
            rotation,
            title: args.title.clone(),
            bins: args.bins.unwrap_or(config.defaults.heatmap_bins),
            bandwidth: args.bandwidth.unwrap_or(config.defaults.bandwidth),
        };
        let output = if per_frame {
            frame_path(&args.output, rotation)
        } else {
            args.output.clone()
        };

        info!("Rendering heatmap at rotation {} to {:?}", rotation, &output);
        let written = render_svg(&output, config.plot_size(), |root| {
            draw_heatmap(root, &analysis.dataset, &params).map(|_| ())
        })?;
        println!(
            "✓ Heatmap at {}° written to: {}",
            rotation,
            written.display()
        );
    }
    Ok(())
}

/// `heat.svg` at 90° becomes `heat_rot90.svg`.
fn frame_path(output: &Path, rotation: f64) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}_rot{}.{}", stem, rotation, ext.to_string_lossy()),
        None => format!("{}_rot{}", stem, rotation),
    };
    output.with_file_name(name)
}
