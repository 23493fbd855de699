use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use playback_controls::controls::{
    ControlsDeriver, DerivedControlsState, OverlayVisibility, TopBarState,
};
use playback_controls::config::LoggingConfig;
use playback_controls::{Config, PlayerSnapshot, SeekMultiplier, SourceDataState, SourceLink};

/// Derive the playback-controls overlay state for a player snapshot
#[derive(Parser, Debug)]
#[command(name = "controls-probe", version)]
struct Cli {
    /// Queued seek steps; negative values seek backward
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    seek: i64,

    /// Source resolution state: idle, loading, success[:message] or error:reason
    #[arg(long, default_value = "success")]
    source: SourceDataState,

    /// Index of the selected server in the snapshot's `servers` list
    #[arg(long, default_value_t = 0)]
    server: i32,

    /// Treat the controls as hidden
    #[arg(long)]
    hidden: bool,

    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snapshot JSON file; stdin when omitted
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ProbeInput {
    #[serde(flatten)]
    snapshot: PlayerSnapshot,
    #[serde(default)]
    servers: Vec<SourceLink>,
    #[serde(default)]
    top_bar: TopBarState,
}

#[derive(Debug, Serialize)]
struct ProbeOutput {
    top_bar: TopBarState,
    controls: DerivedControlsState,
    visibility: OverlayVisibility,
}

fn log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Subscriber used until the config, and with it the configured filter, is loaded
fn bootstrap_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => Config::load().context("Failed to load config"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let bootstrap = bootstrap_subscriber(
        log_filter(&LoggingConfig::default().filter),
        std::io::stderr,
    );
    let config = tracing::subscriber::with_default(bootstrap, || load_config(&cli))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting controls probe");

    let raw = match &cli.snapshot {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {:?}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read snapshot from stdin")?;
            buffer
        }
    };
    let input: ProbeInput = serde_json::from_str(&raw).context("Failed to parse snapshot")?;
    debug!(?input, "Parsed probe input");

    let seek = SeekMultiplier(cli.seek);
    let mut deriver =
        ControlsDeriver::new(config.controls_settings()).context("Invalid controls settings")?;
    let controls = deriver.derive(
        &input.snapshot,
        seek,
        &cli.source,
        &input.servers,
        cli.server,
    );
    let visibility = OverlayVisibility::compute(
        !cli.hidden,
        seek,
        controls.is_loading,
        input.top_bar.has_next_episode(),
    );

    let output = ProbeOutput {
        top_bar: input.top_bar,
        controls,
        visibility,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize output")?
    );

    Ok(())
}
