//! Report assembly: input validation plus the three chains.

use chrono::NaiveDate;
use echoes_types::{CalendarDate, CurrentMoon, MoonReport, PhaseName, ResolvedPhase, WeatherReport};
use tracing::info;

use crate::config::EchoesConfig;
use crate::error::ReportError;
use crate::images::ImageChain;
use crate::resolver::PhaseResolver;
use crate::weather::WeatherChain;

/// Validate the visitor's date input against `today`.
///
/// Accepts `YYYY-MM-DD` only. Blank input is [`ReportError::MissingDate`];
/// today itself is allowed.
pub fn parse_requested_date(input: Option<&str>, today: NaiveDate) -> Result<CalendarDate, ReportError> {
    let raw = input.map(str::trim).filter(|s| !s.is_empty()).ok_or(ReportError::MissingDate)?;
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .ok_or_else(|| ReportError::InvalidDate(raw.to_owned()))?;
    if date > today {
        return Err(ReportError::FutureDate);
    }
    Ok(CalendarDate::from(date))
}

/// One-sentence summary of the moon on `date`.
pub fn describe(date: CalendarDate, phase: PhaseName) -> String {
    let when = date
        .to_naive()
        .map_or_else(|| date.to_string(), |d| d.format("%A, %B %-d, %Y").to_string());
    format!(
        "On {when}, the moon was in its {} phase.",
        phase.label().to_lowercase()
    )
}

/// Suggested file name for saving the phase image.
pub fn download_name(date: CalendarDate) -> String {
    format!("moon-{date}.jpg")
}

/// Builds reports from the phase, weather and image chains.
#[derive(Debug, Clone)]
pub struct ReportService {
    phases: PhaseResolver,
    weather: WeatherChain,
    images: ImageChain,
}

impl ReportService {
    /// Combine three chains into a service.
    pub const fn new(phases: PhaseResolver, weather: WeatherChain, images: ImageChain) -> Self {
        Self {
            phases,
            weather,
            images,
        }
    }

    /// Build every chain from config.
    pub fn from_config(config: &EchoesConfig) -> Self {
        Self::new(
            PhaseResolver::from_config(config),
            WeatherChain::from_config(config),
            ImageChain::from_config(config),
        )
    }

    /// A service that never touches the network.
    pub const fn offline(seed: u64) -> Self {
        Self::new(
            PhaseResolver::local_only(),
            WeatherChain::synthetic(seed),
            ImageChain::catalog_only(),
        )
    }

    /// The phase for `date`.
    pub async fn phase(&self, date: CalendarDate) -> ResolvedPhase {
        self.phases.resolve(date).await
    }

    /// The weather for `date`.
    pub async fn weather(&self, date: CalendarDate) -> WeatherReport {
        self.weather.resolve(date).await
    }

    /// Everything the results page shows for `date`.
    pub async fn build(&self, date: CalendarDate) -> MoonReport {
        let phase = self.phases.resolve(date).await;
        let weather = self.weather.resolve(date).await;
        let (image_url, image_origin) = self.images.resolve(phase.descriptor.phase_name).await;

        info!(
            %date,
            phase = %phase.descriptor.phase_name,
            phase_origin = %phase.origin,
            weather_origin = %weather.origin,
            "report built"
        );

        MoonReport {
            date,
            description: describe(date, phase.descriptor.phase_name),
            download_name: download_name(date),
            phase,
            weather,
            image_url,
            image_origin,
        }
    }

    /// Today's phase and image.
    pub async fn current(&self, today: NaiveDate) -> CurrentMoon {
        let date = CalendarDate::from(today);
        let phase = self.phases.resolve(date).await;
        let (image_url, image_origin) = self.images.resolve(phase.descriptor.phase_name).await;
        CurrentMoon {
            date,
            phase,
            image_url,
            image_origin,
        }
    }
}
