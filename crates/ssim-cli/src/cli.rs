use clap::{Args, Parser, Subcommand, ValueEnum};
use ssim_core::core::models::energy::{EnergyColumn, EnergyComponent};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "SSIM CLI - Analyse and plot surface-surface interaction energies between crystal facets.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file declaring the datasets, in TOML format.
    #[arg(short, long, global = true, value_name = "PATH", default_value = "ssim.toml")]
    pub config: PathBuf,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load datasets and print their probability tables, facet pairs and load reports.
    Summary(SummaryArgs),
    /// Draw per-facet violins of one or two energy columns.
    Violin(ViolinArgs),
    /// Draw kernel density curves of one energy component for several datasets.
    Distribution(DistributionArgs),
    /// Draw the displacement heatmap of one facet pair at one or every rotation.
    Heatmap(HeatmapArgs),
    /// Compare cohesion against adhesion per probe facet and fit the balance line.
    Cab(CabArgs),
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Dataset to summarize. Defaults to every dataset in the configuration file.
    #[arg(short, long, value_name = "NAME")]
    pub dataset: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerArg {
    None,
    Box,
    Quartiles,
}

/// Arguments for the `violin` subcommand.
#[derive(Args, Debug)]
pub struct ViolinArgs {
    /// Dataset to plot.
    #[arg(short, long, required = true, value_name = "NAME")]
    pub dataset: String,

    /// Output chart path; `.png` is written as `.svg`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Energy column on the left half (e.g. 'Total Energy', 'Weighted H-Bond').
    #[arg(long, value_name = "COLUMN", default_value = "Total Energy")]
    pub left: EnergyColumn,

    /// Energy column on the right half; defaults to the left column (full violins).
    #[arg(long, value_name = "COLUMN")]
    pub right: Option<EnergyColumn>,

    /// Facet pairs to draw, in order. Can be used multiple times.
    #[arg(long = "facet", value_name = "LABEL", conflicts_with = "first_seen")]
    pub facets: Vec<String>,

    /// Keep facet pairs in load order instead of ascending mean total energy.
    #[arg(long)]
    pub first_seen: bool,

    /// Lower limit of the energy axis.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Upper limit of the energy axis.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Kernel bandwidth as a multiple of the sample standard deviation.
    #[arg(long, value_name = "FLOAT")]
    pub bandwidth: Option<f64>,

    /// Marker drawn inside each violin.
    #[arg(long, value_enum, default_value_t = InnerArg::None)]
    pub inner: InnerArg,

    /// Lay violins out horizontally.
    #[arg(long)]
    pub horizontal: bool,

    #[arg(long)]
    pub title: Option<String>,
}

/// Arguments for the `distribution` subcommand.
#[derive(Args, Debug)]
pub struct DistributionArgs {
    /// Datasets to compare. Can be used multiple times.
    #[arg(short, long = "dataset", required = true, value_name = "NAME")]
    pub datasets: Vec<String>,

    /// Output chart path; `.png` is written as `.svg`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Energy component (e.g. 'Total Energy', 'vdw').
    #[arg(long, value_name = "COMPONENT", default_value = "Total Energy")]
    pub component: EnergyComponent,

    /// Use the probability-weighted energies.
    #[arg(long)]
    pub weighted: bool,

    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub min: Option<f64>,

    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Kernel bandwidth as a multiple of the sample standard deviation.
    #[arg(long, value_name = "FLOAT")]
    pub bandwidth: Option<f64>,

    /// Print count, mean, std, min, quartiles and max per dataset.
    #[arg(long)]
    pub describe: bool,

    #[arg(long)]
    pub title: Option<String>,
}

/// Which rotations the `heatmap` subcommand renders.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct RotationSelection {
    /// Rotation angle to render.
    #[arg(long, value_name = "DEGREES", allow_hyphen_values = true)]
    pub rotation: Option<f64>,
    /// Render one frame per sampled rotation.
    #[arg(long)]
    pub all_rotations: bool,
}

/// Arguments for the `heatmap` subcommand.
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    #[arg(short, long, required = true, value_name = "NAME")]
    pub dataset: String,

    /// Output chart path; frames get a `_rot<angle>` suffix with `--all-rotations`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Facet pair label, e.g. '011/002'.
    #[arg(long, required = true, value_name = "LABEL")]
    pub facet: String,

    #[arg(long, value_name = "COLUMN", default_value = "Total Energy")]
    pub column: EnergyColumn,

    #[command(flatten)]
    pub rotations: RotationSelection,

    /// Number of histogram bins in the value panel.
    #[arg(long, value_name = "INT")]
    pub bins: Option<usize>,

    #[arg(long, value_name = "FLOAT")]
    pub bandwidth: Option<f64>,

    #[arg(long)]
    pub title: Option<String>,
}

/// Arguments for the `cab` subcommand.
#[derive(Args, Debug)]
pub struct CabArgs {
    /// Dataset of the probe material (cohesion).
    #[arg(long, required = true, value_name = "NAME")]
    pub probe: String,

    /// Dataset of the probe against the excipient (adhesion).
    #[arg(long, required = true, value_name = "NAME")]
    pub excipient: String,

    /// Output chart path; `.png` is written as `.svg`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the per-probe table as CSV.
    #[arg(long, value_name = "PATH")]
    pub table_out: Option<PathBuf>,

    #[arg(long, value_name = "COMPONENT", default_value = "Total Energy")]
    pub component: EnergyComponent,

    /// Use the probability-weighted energies.
    #[arg(long)]
    pub weighted: bool,

    /// Match the probe facet as the second facet of excipient pairs.
    #[arg(long)]
    pub excipient_probe: bool,

    /// Report medians instead of means.
    #[arg(long)]
    pub median: bool,

    /// Legend label of the probe points.
    #[arg(long, value_name = "TEXT")]
    pub label: Option<String>,

    /// Axis limits as 'LOW,HIGH' applied to both axes.
    #[arg(long, value_name = "LOW,HIGH", allow_hyphen_values = true, value_parser = parse_limits)]
    pub limits: Option<(f64, f64)>,

    #[arg(long)]
    pub title: Option<String>,
}

fn parse_limits(s: &str) -> Result<(f64, f64), String> {
    let (low, high) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'LOW,HIGH', got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid limit '{}': {}", v, e))
    };
    Ok((parse(low)?, parse(high)?))
}
