//! Application configuration for Echo Base.
//!
//! User config lives at `~/.echobase/echobase.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{EchoBaseError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "echobase.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".echobase";

// ---------------------------------------------------------------------------
// Config structs (matching echobase.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote catalog settings.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Normalization pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// Input and output document locations.
    #[serde(default)]
    pub files: FilesSection,
}

/// `[catalog]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Root of the catalog API (collections live under it).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://swapi.dev/api".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSection {
    /// How many levels of nested references may be resolved below a top-level record.
    #[serde(default = "default_max_reference_depth")]
    pub max_reference_depth: usize,

    /// Factor applied to transport capacity when planning an overloaded lift.
    #[serde(default = "default_overload_multiplier")]
    pub passenger_overload_multiplier: i64,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            max_reference_depth: default_max_reference_depth(),
            passenger_overload_multiplier: default_overload_multiplier(),
        }
    }
}

fn default_max_reference_depth() -> usize {
    1
}
fn default_overload_multiplier() -> i64 {
    3
}

/// `[files]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesSection {
    /// Planet list to scan for uninhabited planets.
    #[serde(default = "default_planets_input")]
    pub planets_input: String,

    /// Where the uninhabited planet list is written.
    #[serde(default = "default_uninhabited_output")]
    pub uninhabited_output: String,

    /// Seed Echo Base document.
    #[serde(default = "default_echo_base_input")]
    pub echo_base_input: String,

    /// Where the enriched Echo Base document is written.
    #[serde(default = "default_echo_base_output")]
    pub echo_base_output: String,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            planets_input: default_planets_input(),
            uninhabited_output: default_uninhabited_output(),
            echo_base_input: default_echo_base_input(),
            echo_base_output: default_echo_base_output(),
        }
    }
}

fn default_planets_input() -> String {
    "swapi_planets-v1p0.json".into()
}
fn default_uninhabited_output() -> String {
    "swapi_planets_uninhabited-v1p1.json".into()
}
fn default_echo_base_input() -> String {
    "swapi_echo_base-v1p0.json".into()
}
fn default_echo_base_output() -> String {
    "swapi_echo_base-v1p1.json".into()
}

// ---------------------------------------------------------------------------
// Catalog config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime catalog configuration with a validated base URL.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog root, always without a trailing slash.
    pub base_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Parse and validate a base URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| EchoBaseError::config(format!("invalid catalog base_url '{base_url}': {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(EchoBaseError::config(format!(
                "catalog base_url must be http(s), got '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

impl TryFrom<&AppConfig> for CatalogConfig {
    type Error = EchoBaseError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Self::new(&config.catalog.base_url, config.catalog.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.echobase/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| EchoBaseError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.echobase/echobase.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| EchoBaseError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| EchoBaseError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| EchoBaseError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| EchoBaseError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| EchoBaseError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
