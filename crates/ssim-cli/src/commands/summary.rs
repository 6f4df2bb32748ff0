use crate::cli::SummaryArgs;
use crate::commands::load_analysis;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use ssim_core::core::models::facet::FacetPair;
use ssim_core::core::models::morphology::CollisionProbabilityTable;
use ssim_core::workflows::analyse::Analysis;
use tracing::info;

pub fn run(args: SummaryArgs, config: &AppConfig) -> Result<()> {
    let names: Vec<String> = match args.dataset {
        Some(name) => vec![name],
        None => config.dataset_names().into_iter().map(String::from).collect(),
    };
    if names.is_empty() {
        return Err(CliError::Config(
            "the configuration file declares no datasets".to_string(),
        ));
    }

    for name in &names {
        let analysis = load_analysis(config, name)?;
        info!("Printing summary of dataset '{}'.", name);
        print_summary(&analysis);
    }
    Ok(())
}

fn print_summary(analysis: &Analysis) {
    println!();
    println!("=== {} ===", analysis.name);

    println!("Collision probabilities:");
    for line in probability_lines(&analysis.probabilities) {
        println!("  {}", line);
    }

    println!("Facet pairs:");
    for label in analysis.dataset.facet_labels() {
        let rotations = analysis.dataset.rotations(&label);
        println!("  {:<12} {} rotation(s)", label, rotations.len());
    }

    let weighted = analysis.dataset.energy_columns(true);
    let columns: Vec<String> = analysis
        .dataset
        .energy_columns(false)
        .into_iter()
        .chain(weighted)
        .map(|c| c.to_string())
        .collect();
    println!("Energy columns: {}", columns.join(", "));
}

/// Header line of second-surface facets, then one line per first-surface facet.
fn probability_lines(table: &CollisionProbabilityTable) -> Vec<String> {
    let columns = table.second_surface().entries();
    let header = columns.iter().map(|b| format!("{:>8}", b.facet.as_str()));
    let mut lines = vec![format!("{:>8} {}", "", format_row(header))];
    for a in table.first_surface().entries() {
        let row = columns.iter().map(|b| {
            match table.get(&FacetPair::new(a.facet.clone(), b.facet.clone())) {
                Some(p) => format!("{:>8.4}", p),
                None => format!("{:>8}", "-"),
            }
        });
        lines.push(format!("{:>8} {}", a.facet.as_str(), format_row(row)));
    }
    lines
}

fn format_row(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssim_core::core::models::facet::Facet;
    use ssim_core::core::models::morphology::{MorphologyEntry, MorphologySurface};

    fn surface(entries: &[(&str, f64)]) -> MorphologySurface {
        MorphologySurface::new(
            entries
                .iter()
                .map(|(hkl, percent)| MorphologyEntry::new(Facet::from(*hkl), *percent))
                .collect(),
        )
    }

    #[test]
    fn probability_lines_follow_surface_order() {
        let table = CollisionProbabilityTable::from_surfaces(
            surface(&[("011", 60.0), ("002", 40.0)]),
            surface(&[("100", 50.0), ("110", 50.0)]),
        );

        let lines = probability_lines(&table);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("100") && lines[0].contains("110"));
        assert!(lines[1].trim_start().starts_with("011"));
        assert!(lines[1].contains("0.3000"));
        assert!(lines[2].contains("0.2000"));
    }
}
