use crate::cli::{InnerArg, ViolinArgs};
use crate::commands::{axis_range, load_analysis};
use crate::config::AppConfig;
use crate::error::Result;
use ssim_core::plots::render_svg;
use ssim_core::plots::violin::{FacetOrder, InnerMarker, Orientation, ViolinParams, draw_violin};
use tracing::info;

pub fn run(args: ViolinArgs, config: &AppConfig) -> Result<()> {
    let analysis = load_analysis(config, &args.dataset)?;
    let params = build_params(&args, config);

    info!("Rendering violin plot to {:?}", &args.output);
    let written = render_svg(&args.output, config.plot_size(), |root| {
        draw_violin(root, &analysis.dataset, &params)
    })?;
    println!("✓ Violin plot written to: {}", written.display());
    Ok(())
}

fn build_params(args: &ViolinArgs, config: &AppConfig) -> ViolinParams {
    let facets = if !args.facets.is_empty() {
        FacetOrder::Explicit(args.facets.clone())
    } else if args.first_seen {
        FacetOrder::FirstSeen
    } else {
        FacetOrder::ByMean
    };
    ViolinParams {
        left: args.left,
        right: args.right.unwrap_or(args.left),
        facets,
        value_range: axis_range(args.min, args.max, config.defaults.violin_range),
        title: args.title.clone(),
        bandwidth: args.bandwidth.unwrap_or(config.defaults.bandwidth),
        inner: match args.inner {
            InnerArg::None => InnerMarker::None,
            InnerArg::Box => InnerMarker::Box,
            InnerArg::Quartiles => InnerMarker::Quartiles,
        },
        orientation: if args.horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    fn args(extra: &[&str]) -> ViolinArgs {
        let base = ["ssim", "violin", "-d", "api", "-o", "violin.svg"];
        let cli = Cli::parse_from(base.iter().chain(extra).copied());
        let Commands::Violin(args) = cli.command else {
            panic!("expected violin");
        };
        args
    }

    #[test]
    fn defaults_sort_by_mean_without_inner_marker() {
        let config = AppConfig::parse("", PathBuf::new()).unwrap();
        let params = build_params(&args(&[]), &config);

        assert_eq!(params.facets, FacetOrder::ByMean);
        assert_eq!(params.inner, InnerMarker::None);
        assert_eq!(params.right, params.left);
        assert_eq!(params.value_range, (-40.0, 0.0));
        assert_eq!(params.bandwidth, 0.2);
    }

    #[test]
    fn explicit_facets_and_first_seen_override_sorting() {
        let config = AppConfig::parse("", PathBuf::new()).unwrap();
        let explicit = build_params(&args(&["--facet", "011/002", "--facet", "002/002"]), &config);
        assert_eq!(
            explicit.facets,
            FacetOrder::Explicit(vec!["011/002".to_string(), "002/002".to_string()])
        );

        let first_seen = build_params(&args(&["--first-seen", "--horizontal"]), &config);
        assert_eq!(first_seen.facets, FacetOrder::FirstSeen);
        assert_eq!(first_seen.orientation, Orientation::Horizontal);
    }
}
