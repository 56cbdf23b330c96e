//! Renders kube-janitor manifests from a chart and values files.
#![deny(missing_docs)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kube_janitor_common::telemetry::{self, LogFormat};
use tracing::info;

use kube_janitor_renderer::{
    loader::{load_chart, load_values},
    render,
    values::{ReleaseContext, UserValues, DEFAULT_NAMESPACE},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Format of log lines written to stderr.
    #[arg(long, value_enum, default_value_t, env = "RENDER_LOG_FORMAT")]
    log_format: Format,
}

/// Available Subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Render all manifests of a release as a YAML stream
    Render(RenderOpts),
    /// Print the JSON schema of the values file
    Schema,
}

/// Options to Render command
#[derive(Args, Debug)]
struct RenderOpts {
    /// Path to the Chart.yaml of the chart.
    #[arg(long, env = "RENDER_CHART", default_value = "Chart.yaml")]
    chart: PathBuf,

    /// Values files, later files take precedence.
    #[arg(short = 'f', long = "values")]
    values: Vec<PathBuf>,

    /// Name of the release.
    #[arg(long, env = "RENDER_RELEASE_NAME")]
    release_name: String,

    /// Namespace of the release.
    #[arg(long, env = "RENDER_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,
}

#[derive(Clone, Debug, Default, ValueEnum)]
enum Format {
    /// Compact human readable lines
    #[default]
    Compact,
    /// JSON lines
    Json,
}

impl From<Format> for LogFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Compact => LogFormat::Compact,
            Format::Json => LogFormat::Json,
        }
    }
}

fn render_release(opts: RenderOpts) -> Result<String> {
    let chart = load_chart(&opts.chart)
        .with_context(|| format!("loading chart {}", opts.chart.display()))?;
    let values = load_values(opts.values.as_slice()).context("loading values")?;
    let release = ReleaseContext::new(opts.release_name).with_namespace(opts.namespace);
    info!(
        chart = %chart.name,
        release = %release.release_name,
        namespace = %release.namespace,
        "rendering release"
    );
    let manifests = render(&chart, &release, &values)?;
    Ok(manifests.to_yaml()?)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    telemetry::init(args.log_format.into())?;

    let output = match args.command {
        Command::Render(opts) => render_release(opts)?,
        Command::Schema => serde_json::to_string_pretty(&schemars::schema_for!(UserValues))?,
    };
    print!("{output}");
    Ok(())
}
