//! Server binary for the Echoes moon-phase service.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ECHOES_CONFIG` or `echoes-config.yaml`
//!    under a bootstrap subscriber (`RUST_LOG`, default `info`)
//! 2. Initialize structured logging (tracing) from the loaded config
//! 3. Build the phase, weather and image chains
//! 4. Serve pages, API and carousel until `Ctrl-C`

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use echoes_core::{ConfigError, EchoesConfig};
use echoes_observer::{AppState, ServerConfig, shutdown_signal, start_server};
use tracing::info;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "echoes-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config file is invalid, the templates fail to
/// compile, or the listener cannot bind.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Override warnings go to a bootstrap
    //    subscriber until the configured one is installed.
    let config_path = config_path();
    let (config, found) = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        load_config(&config_path, |key| std::env::var(key).ok())
    })?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!("echoes-server starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Build the data-source chains.
    let state = AppState::from_config(&config)?;
    info!(
        farmsense = config.phase.farmsense.enabled,
        open_meteo = config.weather.open_meteo.enabled,
        nasa_images = config.images.nasa.enabled,
        weather_seed = config.weather.seed,
        carousel_interval_ms = config.carousel.interval_ms,
        "Data sources configured"
    );

    // 4. Serve until Ctrl-C.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, Arc::new(state), shutdown_signal()).await?;

    info!("echoes-server stopped");
    Ok(())
}

fn config_path() -> PathBuf {
    std::env::var_os("ECHOES_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration, falling back to defaults when the file does not
/// exist. Environment overrides are read through `lookup` either way.
fn load_config(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(EchoesConfig, bool), AppError> {
    let found = path.exists();
    let mut config = if found {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        EchoesConfig::parse_without_env(&contents)?
    } else {
        EchoesConfig::default()
    };
    config.apply_overrides(lookup);
    Ok((config, found))
}

/// Plain-text subscriber used while the config is being read.
fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish()
}

fn init_tracing(config: &EchoesConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    const MISSING: &str = "/nonexistent/echoes-config.yaml";

    /// Collects formatted log lines in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn missing_file_means_defaults() {
        let result = load_config(Path::new(MISSING), |_| None);
        assert!(matches!(result, Ok((_, false))));
    }

    #[test]
    fn env_overrides_apply_without_a_file() {
        let (config, _) = load_config(Path::new(MISSING), |key| {
            (key == "ECHOES_PORT").then(|| "9090".to_owned())
        })
        .unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn invalid_port_warning_reaches_a_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let (config, _) = tracing::subscriber::with_default(subscriber, || {
            load_config(Path::new(MISSING), |key| {
                (key == "ECHOES_PORT").then(|| "abc".to_owned())
            })
        })
        .unwrap();

        assert_eq!(config.server.port, EchoesConfig::default().server.port);
        assert!(captured.text().contains("ignoring invalid ECHOES_PORT"), "{}", captured.text());
    }
}
