//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use echobase_catalog::CatalogClient;
use echobase_core::enrichment::EchoBaseEnricher;
use echobase_core::pipeline::{self, ProgressReporter, RunConfig, RunSummary};
use echobase_shared::{AppConfig, CatalogConfig, EntityKind, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Echo Base: normalize catalog records and plan the evacuation of Hoth.
#[derive(Parser)]
#[command(
    name = "echobase",
    version,
    about = "Normalize star-wars catalog records into the Echo Base dataset.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Catalog API root (overrides the config file).
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Write the uninhabited planets and the enriched Echo Base documents.
    Run {
        /// Planets document.
        #[arg(long)]
        planets: Option<PathBuf>,

        /// Echo Base seed document.
        #[arg(long)]
        echo_base: Option<PathBuf>,

        /// Directory the outputs are written to (defaults to the working directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Write only the uninhabited planets document.
    Planets {
        /// Planets document.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output path.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Search the catalog and print the first match, normalized.
    Fetch {
        /// Entity kind: person, planet, starship, species, vehicle.
        kind: EntityKind,

        /// Search term.
        term: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "echobase=info",
        1 => "echobase=debug",
        _ => "echobase=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            planets,
            echo_base,
            out_dir,
        } => {
            let config = resolved_config(cli.catalog_url.as_deref())?;
            cmd_run(&config, planets, echo_base, out_dir).await
        }
        Command::Planets { input, out } => {
            let config = resolved_config(cli.catalog_url.as_deref())?;
            cmd_planets(&config, input, out).await
        }
        Command::Fetch { kind, term } => {
            let config = resolved_config(cli.catalog_url.as_deref())?;
            cmd_fetch(&config, kind, &term).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(cli.catalog_url.as_deref()).await,
        },
    }
}

/// Config file values with command-line overrides applied.
fn resolved_config(catalog_url: Option<&str>) -> Result<AppConfig> {
    let mut config = load_config()?;
    if let Some(url) = catalog_url {
        config.catalog.base_url = url.to_string();
    }
    Ok(config)
}

async fn cmd_run(
    config: &AppConfig,
    planets: Option<PathBuf>,
    echo_base: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let mut run_config = RunConfig::from_app_config(config)?;
    if let Some(path) = planets {
        run_config.planets_input = path;
    }
    if let Some(path) = echo_base {
        run_config.echo_base_input = path;
    }
    if let Some(dir) = out_dir {
        run_config.uninhabited_output = dir.join(&run_config.uninhabited_output);
        run_config.echo_base_output = dir.join(&run_config.echo_base_output);
    }

    info!(
        planets = %run_config.planets_input.display(),
        echo_base = %run_config.echo_base_input.display(),
        "running pipeline"
    );

    let reporter = CliProgress::new()?;
    let summary = pipeline::run(&run_config, &reporter).await?;
    print_summary(&summary);
    Ok(())
}

async fn cmd_planets(config: &AppConfig, input: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let mut run_config = RunConfig::from_app_config(config)?;
    if let Some(path) = input {
        run_config.planets_input = path;
    }
    if let Some(path) = out {
        run_config.uninhabited_output = path;
    }

    let reporter = CliProgress::new()?;
    let summary = pipeline::run_uninhabited(&run_config, &reporter).await?;
    print_summary(&summary);
    Ok(())
}

async fn cmd_fetch(config: &AppConfig, kind: EntityKind, term: &str) -> Result<()> {
    let catalog = CatalogConfig::try_from(config)?;
    let client = CatalogClient::new(&catalog)?;
    let enricher = EchoBaseEnricher::new(
        &client,
        config.pipeline.max_reference_depth,
        config.pipeline.passenger_overload_multiplier,
    );

    info!(%kind, term, "searching catalog");
    let record = enricher.lookup(kind, term).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("  Uninhabited planets: {}", summary.uninhabited_planets);
    println!("  Planets written to:  {}", summary.uninhabited_output.display());
    if let Some(path) = &summary.echo_base_output {
        println!("  Echo Base written to: {}", path.display());
    }
    println!("  Time: {:.1}s", summary.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")?
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self { spinner })
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_ready(&self, label: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Normalized [{current}/{total}] {label}"));
    }

    fn done(&self, _summary: &RunSummary) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // error paths never reach `done`
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(catalog_url: Option<&str>) -> Result<()> {
    let config = resolved_config(catalog_url)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetch_with_kind() {
        let cli = Cli::try_parse_from(["echobase", "fetch", "starship", "millennium"]).unwrap();
        match cli.command {
            Command::Fetch { kind, term } => {
                assert_eq!(kind, EntityKind::Starship);
                assert_eq!(term, "millennium");
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn fetch_accepts_collection_names() {
        let cli = Cli::try_parse_from(["echobase", "fetch", "people", "leia"]).unwrap();
        assert!(matches!(cli.command, Command::Fetch { kind: EntityKind::Person, .. }));
    }

    #[test]
    fn spinner_is_cleared_when_dropped_without_done() {
        let progress = CliProgress::new().unwrap();
        let spinner = progress.spinner.clone();
        progress.phase("Reading seed documents");
        drop(progress);
        assert!(spinner.is_finished());
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["echobase", "fetch", "droids", "r2"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "echobase",
            "run",
            "--out-dir",
            "out",
            "--catalog-url",
            "http://localhost:8000/api",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
        assert_eq!(cli.catalog_url.as_deref(), Some("http://localhost:8000/api"));
        match cli.command {
            Command::Run { out_dir, planets, .. } => {
                assert_eq!(out_dir, Some(PathBuf::from("out")));
                assert!(planets.is_none());
            }
            _ => panic!("expected run"),
        }
    }
}
