//! Configuration loading and typed config structures for the Echoes service.
//!
//! The canonical configuration lives in `echoes-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file at all) is
//! a working offline-capable configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

/// Top-level service configuration.
///
/// Mirrors the structure of `echoes-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EchoesConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Remote moon-phase sources.
    #[serde(default)]
    pub phase: PhaseConfig,

    /// Weather sources.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Moon image sources.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Landing-page carousel.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EchoesConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `ECHOES_HOST` overrides `server.host`
    /// - `ECHOES_PORT` overrides `server.port`
    /// - `ECHOES_LOG_LEVEL` overrides `logging.level`
    /// - `ECHOES_OFFLINE` (`1`, `true`, `yes`, `on`) disables every remote source
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `ECHOES_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `ECHOES_*` overrides using `lookup` to read variables.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ECHOES_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("ECHOES_PORT") {
            match val.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!(value = %val, error = %e, "ignoring invalid ECHOES_PORT"),
            }
        }
        if let Some(val) = lookup("ECHOES_LOG_LEVEL") {
            self.logging.level = val;
        }
        if lookup("ECHOES_OFFLINE").is_some_and(|val| is_truthy(&val)) {
            self.disable_remote_sources();
        }
    }

    /// Turn off every source that needs the network.
    pub const fn disable_remote_sources(&mut self) {
        self.phase.farmsense.enabled = false;
        self.weather.open_meteo.enabled = false;
        self.images.nasa.enabled = false;
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Remote moon-phase sources, tried before the local calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhaseConfig {
    /// The `FarmSense` moon phase API.
    #[serde(default)]
    pub farmsense: FarmSenseConfig,
}

/// `FarmSense` API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FarmSenseConfig {
    /// Whether to query the API at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Endpoint URL; the unix timestamp is sent as the `d` query parameter.
    #[serde(default = "default_farmsense_url")]
    pub api_url: String,

    /// Per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FarmSenseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_farmsense_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather sources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherConfig {
    /// Seed for the synthetic weather generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// The Open-Meteo historical archive.
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            open_meteo: OpenMeteoConfig::default(),
        }
    }
}

/// Open-Meteo archive settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenMeteoConfig {
    /// Whether to query the archive. Off by default: the synthetic
    /// generator is the reference behavior.
    #[serde(default)]
    pub enabled: bool,

    /// Archive endpoint URL.
    #[serde(default = "default_open_meteo_url")]
    pub api_url: String,

    /// Latitude of the observing location, in degrees.
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude of the observing location, in degrees.
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_open_meteo_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Moon image sources, tried before the built-in catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImagesConfig {
    /// The NASA image library search API.
    #[serde(default)]
    pub nasa: NasaImagesConfig,
}

/// NASA image library settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NasaImagesConfig {
    /// Whether to search the library at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Search endpoint URL.
    #[serde(default = "default_nasa_url")]
    pub api_url: String,

    /// Per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NasaImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_nasa_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Carousel / logging
// ---------------------------------------------------------------------------

/// Landing-page carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CarouselConfig {
    /// Milliseconds each phase stays on screen.
    #[serde(default = "default_carousel_interval_ms")]
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_carousel_interval_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

const fn default_true() -> bool {
    true
}

fn default_farmsense_url() -> String {
    "https://api.farmsense.net/v1/moonphases/".to_owned()
}

const fn default_timeout_ms() -> u64 {
    3000
}

const fn default_seed() -> u64 {
    42
}

fn default_open_meteo_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".to_owned()
}

// Greenwich.
const fn default_latitude() -> f64 {
    51.4769
}

const fn default_longitude() -> f64 {
    0.0
}

fn default_nasa_url() -> String {
    "https://images-api.nasa.gov/search".to_owned()
}

const fn default_carousel_interval_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_owned()
}
