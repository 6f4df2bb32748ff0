use crate::cli::CabArgs;
use crate::commands::load_analysis;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use ssim_core::engine::cab::{CabOptions, CabTable, Descriptor};
use ssim_core::plots::cab::{CabPlotParams, draw_cab};
use ssim_core::plots::render_svg;
use ssim_core::workflows::cab;
use std::fs::File;
use tracing::{info, warn};

pub fn run(args: CabArgs, config: &AppConfig) -> Result<()> {
    let probe = load_analysis(config, &args.probe)?;
    let excipient = load_analysis(config, &args.excipient)?;

    let options = CabOptions {
        weighted: args.weighted,
        excipient_as_probe: args.excipient_probe,
        descriptor: if args.median {
            Descriptor::Median
        } else {
            Descriptor::Mean
        },
        component: args.component,
    };
    if options.weighted && !(probe.dataset.has_weights() && excipient.dataset.has_weights()) {
        warn!("Weighted energies requested but at least one dataset has no weights.");
    }

    info!("Invoking the cohesion/adhesion workflow...");
    let result = cab::run(&probe.dataset, &excipient.dataset, &options);

    println!();
    println!("{}", format_table(&result.table));
    for loose in &result.table.ambiguous_matches {
        println!(
            "Warning: probe '{}' {} includes '{}' by substring match only.",
            loose.probe,
            loose.group.name(),
            loose.label
        );
    }
    match &result.fit {
        Some(fit) => println!(
            "Gradient: {:.2}, R-squared: {:.2}",
            fit.slope, fit.r_squared
        ),
        None => println!("No probe has both adhesion and cohesion values; no fit."),
    }

    if let Some(path) = &args.table_out {
        info!("Writing probe table to {:?}", path);
        let file = File::create(path).map_err(|e| CliError::FileWriting {
            path: path.clone(),
            source: e.into(),
        })?;
        result
            .table
            .write_csv(file)
            .map_err(|e| CliError::FileWriting {
                path: path.clone(),
                source: e.into(),
            })?;
        println!("✓ Probe table written to: {}", path.display());
    }

    if let Some(output) = &args.output {
        let limits = args.limits.unwrap_or(config.defaults.cab_limits);
        let params = CabPlotParams {
            title: args.title.clone(),
            label: args
                .label
                .clone()
                .unwrap_or_else(|| config.defaults.cab_label.clone()),
            x_range: limits,
            y_range: limits,
        };
        info!("Rendering cohesion/adhesion plot to {:?}", output);
        let written = render_svg(output, config.plot_size(), |root| {
            draw_cab(root, &result.table, &params).map(|_| ())
        })?;
        println!("✓ Cohesion/adhesion plot written to: {}", written.display());
    }
    Ok(())
}

fn format_table(table: &CabTable) -> String {
    let cell = |v: Option<f64>| v.map_or_else(|| format!("{:>14}", "-"), |v| format!("{:>14.4}", v));
    let mut lines = vec![format!(
        "{:<10}{:>14}{:>14}{:>14}{:>14}",
        "Probe", "Adhesion", "Adhesion STD", "Cohesion", "Cohesion STD"
    )];
    for row in &table.rows {
        lines.push(format!(
            "{:<10}{}{}{}{}",
            row.probe,
            cell(row.adhesion.center),
            cell(row.adhesion.std),
            cell(row.cohesion.center),
            cell(row.cohesion.std)
        ));
    }
    lines.join("\n")
}
