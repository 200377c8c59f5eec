//! Weather sources and the weather chain.
//!
//! Mirrors the phase resolver: remote attempts in order, each under its own
//! deadline, then the seeded synthetic generator, which always answers.

use echoes_types::{CalendarDate, DataOrigin, WeatherReport};
use tracing::{debug, warn};

use crate::attempt::{SourceAttempt, bounded};
use crate::config::EchoesConfig;
use crate::error::SourceError;
use crate::open_meteo::OpenMeteoSource;
use crate::synthetic::SyntheticWeather;

/// A source of weather for a date.
#[derive(Debug, Clone)]
pub enum WeatherSource {
    /// The Open-Meteo historical archive.
    OpenMeteo(OpenMeteoSource),
    /// The seeded generator.
    Synthetic(SyntheticWeather),
}

impl WeatherSource {
    /// Ask the source for the weather on `date`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing why this source could not answer.
    /// The synthetic variant never fails.
    pub async fn fetch(&self, date: CalendarDate) -> Result<WeatherReport, SourceError> {
        match self {
            Self::OpenMeteo(source) => source.fetch(date).await,
            Self::Synthetic(generator) => Ok(generator.generate(date)),
        }
    }

    /// The provenance tag for values from this source.
    pub const fn origin(&self) -> DataOrigin {
        match self {
            Self::OpenMeteo(_) => DataOrigin::OpenMeteo,
            Self::Synthetic(_) => DataOrigin::Synthetic,
        }
    }
}

/// One weather source and its deadline.
pub type WeatherAttempt = SourceAttempt<WeatherSource>;

/// Ordered weather sources ending in the synthetic generator.
#[derive(Debug, Clone)]
pub struct WeatherChain {
    attempts: Vec<WeatherAttempt>,
    fallback: SyntheticWeather,
}

impl WeatherChain {
    /// A chain that only generates synthetic weather.
    pub const fn synthetic(seed: u64) -> Self {
        Self {
            attempts: Vec::new(),
            fallback: SyntheticWeather::new(seed),
        }
    }

    /// A chain that tries `attempts` in order before generating.
    pub const fn new(attempts: Vec<WeatherAttempt>, fallback: SyntheticWeather) -> Self {
        Self { attempts, fallback }
    }

    /// Build the chain described by the `weather` config section.
    pub fn from_config(config: &EchoesConfig) -> Self {
        let mut chain = Self::synthetic(config.weather.seed);
        let open_meteo = &config.weather.open_meteo;
        if open_meteo.enabled {
            chain.push(WeatherAttempt::with_timeout_ms(
                WeatherSource::OpenMeteo(OpenMeteoSource::new(open_meteo)),
                open_meteo.timeout_ms,
            ));
        }
        chain
    }

    /// Append an attempt to the end of the chain.
    pub fn push(&mut self, attempt: WeatherAttempt) {
        self.attempts.push(attempt);
    }

    /// Number of attempts before the synthetic fallback.
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Whether the chain is synthetic-only.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Weather for `date`. Never fails.
    pub async fn resolve(&self, date: CalendarDate) -> WeatherReport {
        for attempt in &self.attempts {
            let origin = attempt.source.origin();
            match bounded(origin, attempt.timeout, attempt.source.fetch(date)).await {
                Ok(report) => {
                    debug!(%date, %origin, "weather resolved");
                    return report;
                }
                Err(e) => {
                    warn!(%date, %origin, error = %e, "weather source failed, trying next");
                }
            }
        }
        self.fallback.generate(date)
    }
}
