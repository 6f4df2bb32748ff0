use crate::cli::DistributionArgs;
use crate::commands::{axis_range, load_analysis};
use crate::config::AppConfig;
use crate::error::Result;
use ssim_core::core::stats::Description;
use ssim_core::plots::distribution::{DistributionParams, draw_distribution};
use ssim_core::plots::render_svg;
use ssim_core::workflows::analyse::Analysis;
use tracing::info;

pub fn run(args: DistributionArgs, config: &AppConfig) -> Result<()> {
    let analyses = args
        .datasets
        .iter()
        .map(|name| load_analysis(config, name))
        .collect::<Result<Vec<Analysis>>>()?;
    let datasets: Vec<(&str, _)> = analyses
        .iter()
        .map(|a| (a.name.as_str(), &a.dataset))
        .collect();

    let params = DistributionParams {
        component: args.component,
        weighted: args.weighted,
        x_range: axis_range(args.min, args.max, config.defaults.distribution_range),
        bandwidth: args.bandwidth.unwrap_or(config.defaults.bandwidth),
        title: args.title.clone(),
        describe: args.describe,
    };

    info!("Rendering distribution plot to {:?}", &args.output);
    let mut table = None;
    let written = render_svg(&args.output, config.plot_size(), |root| {
        table = draw_distribution(root, &datasets, &params)?;
        Ok(())
    })?;
    println!("✓ Distribution plot written to: {}", written.display());

    if let Some(table) = table {
        println!();
        println!("{}", format_description(&table));
    }
    Ok(())
}

/// Statistics as rows with one column per dataset.
fn format_description(table: &[(String, Description)]) -> String {
    let mut lines = Vec::with_capacity(Description::ROW_NAMES.len() + 1);
    let header: String = table.iter().map(|(label, _)| format!("{:>14}", label)).collect();
    lines.push(format!("{:<6}{}", "", header));
    for (row, name) in Description::ROW_NAMES.iter().enumerate() {
        let cells: String = table
            .iter()
            .map(|(_, d)| match d.values()[row] {
                Some(v) => format!("{:>14.4}", v),
                None => format!("{:>14}", "NaN"),
            })
            .collect();
        lines.push(format!("{:<6}{}", name, cells));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssim_core::core::stats::describe;

    #[test]
    fn description_table_has_one_column_per_dataset() {
        let table = vec![
            ("API".to_string(), describe(&[-1.0, -3.0]).unwrap()),
            ("EXP".to_string(), describe(&[-2.0]).unwrap()),
        ];
        let text = format_description(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), Description::ROW_NAMES.len() + 1);
        assert!(lines[0].contains("API") && lines[0].contains("EXP"));
        assert!(lines[1].trim_start().starts_with(Description::ROW_NAMES[0]));
        assert!(text.contains("NaN"));
    }
}
