//! End-to-end run: read seed documents → normalize and enrich → write outputs.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use echobase_catalog::CatalogClient;
use echobase_normalize::{Fetch, Normalizer, is_unknown};
use echobase_shared::{AppConfig, CatalogConfig, EchoBaseError, EntityKind, Record, Result};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::documents::{read_json, write_json};
use crate::enrichment::EchoBaseEnricher;

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub catalog: CatalogConfig,
    /// Planets document (a list of planet records).
    pub planets_input: PathBuf,
    pub uninhabited_output: PathBuf,
    /// Echo Base seed document.
    pub echo_base_input: PathBuf,
    pub echo_base_output: PathBuf,
    pub max_reference_depth: usize,
    pub passenger_overload_multiplier: i64,
}

impl RunConfig {
    /// Build a run configuration from the config file, with file names
    /// resolved against the working directory.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            catalog: CatalogConfig::try_from(config)?,
            planets_input: PathBuf::from(&config.files.planets_input),
            uninhabited_output: PathBuf::from(&config.files.uninhabited_output),
            echo_base_input: PathBuf::from(&config.files.echo_base_input),
            echo_base_output: PathBuf::from(&config.files.echo_base_output),
            max_reference_depth: config.pipeline.max_reference_depth,
            passenger_overload_multiplier: config.pipeline.passenger_overload_multiplier,
        })
    }
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of uninhabited planets written.
    pub uninhabited_planets: usize,
    /// Path of the uninhabited planets document.
    pub uninhabited_output: PathBuf,
    /// Path of the enriched Echo Base document, if it was produced.
    pub echo_base_output: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a record has been normalized.
    fn record_ready(&self, label: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, summary: &RunSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_ready(&self, _label: &str, _current: usize, _total: usize) {}
    fn done(&self, _summary: &RunSummary) {}
}

/// Project and normalize every planet whose population is unknown, in
/// input order.
#[instrument(skip_all)]
pub async fn uninhabited_planets<F: Fetch>(
    planets: &Value,
    normalizer: &Normalizer<'_, F>,
    progress: &dyn ProgressReporter,
) -> Result<Vec<Record>> {
    let Value::Array(planets) = planets else {
        return Err(EchoBaseError::document("planets document is not a list"));
    };

    let mut candidates: Vec<&Record> = Vec::new();
    for (i, planet) in planets.iter().enumerate() {
        let planet = planet
            .as_object()
            .ok_or_else(|| EchoBaseError::document(format!("planets[{i}] is not an object")))?;
        let population = planet
            .get("population")
            .ok_or_else(|| EchoBaseError::document(format!("planets[{i}] has no population")))?;
        if is_unknown(population) {
            candidates.push(planet);
        }
    }
    debug!(total = planets.len(), uninhabited = candidates.len(), "filtered planets");

    let mut uninhabited = Vec::with_capacity(candidates.len());
    for (i, planet) in candidates.iter().enumerate() {
        let normalized = normalizer
            .project_and_normalize(EntityKind::Planet, planet)
            .await?;
        let label = normalized
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("unnamed planet");
        progress.record_ready(label, i + 1, candidates.len());
        uninhabited.push(normalized);
    }

    Ok(uninhabited)
}

/// Run only the uninhabited planets flow.
#[instrument(skip_all, fields(input = %config.planets_input.display()))]
pub async fn run_uninhabited(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunSummary> {
    let start = Instant::now();
    let client = CatalogClient::new(&config.catalog)?;
    let normalizer = Normalizer::new(&client).with_max_depth(config.max_reference_depth);

    progress.phase("Reading planets");
    let planets = read_json(&config.planets_input)?;

    progress.phase("Normalizing uninhabited planets");
    let uninhabited = uninhabited_planets(&planets, &normalizer, progress).await?;

    progress.phase("Writing output");
    write_json(&config.uninhabited_output, &uninhabited)?;

    let summary = RunSummary {
        uninhabited_planets: uninhabited.len(),
        uninhabited_output: config.uninhabited_output.clone(),
        echo_base_output: None,
        elapsed: start.elapsed(),
    };
    info!(
        count = summary.uninhabited_planets,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "uninhabited planets written"
    );
    progress.done(&summary);
    Ok(summary)
}

/// Run the full pipeline.
///
/// 1. Read both seed documents
/// 2. Normalize uninhabited planets
/// 3. Enrich Echo Base and plan the evacuation
/// 4. Write both outputs
///
/// Nothing is written unless every step before it succeeded.
#[instrument(skip_all, fields(catalog = %config.catalog.base_url))]
pub async fn run(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunSummary> {
    let start = Instant::now();
    info!("starting pipeline");

    let client = CatalogClient::new(&config.catalog)?;
    let normalizer = Normalizer::new(&client).with_max_depth(config.max_reference_depth);

    // --- Phase 1: Read inputs ---
    progress.phase("Reading seed documents");
    let planets = read_json(&config.planets_input)?;
    let echo_base = read_json(&config.echo_base_input)?;

    // --- Phase 2: Uninhabited planets ---
    progress.phase("Normalizing uninhabited planets");
    let uninhabited = uninhabited_planets(&planets, &normalizer, progress).await?;

    // --- Phase 3: Echo Base ---
    let enricher = EchoBaseEnricher::new(
        &client,
        config.max_reference_depth,
        config.passenger_overload_multiplier,
    );
    let echo_base = enricher.enrich(echo_base, progress).await?;

    // --- Phase 4: Write outputs ---
    progress.phase("Writing outputs");
    write_json(&config.uninhabited_output, &uninhabited)?;
    write_json(&config.echo_base_output, &echo_base)?;

    let summary = RunSummary {
        uninhabited_planets: uninhabited.len(),
        uninhabited_output: config.uninhabited_output.clone(),
        echo_base_output: Some(config.echo_base_output.clone()),
        elapsed: start.elapsed(),
    };

    info!(
        uninhabited = summary.uninhabited_planets,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "pipeline complete"
    );
    progress.done(&summary);
    Ok(summary)
}
