//! Client for the Open-Meteo historical weather archive.
//!
//! Requests one day of daily aggregates and maps the WMO weather code onto
//! the five display conditions.

use echoes_types::{CalendarDate, DataOrigin, WeatherCondition, WeatherReport};
use serde_json::Value;

use crate::config::OpenMeteoConfig;
use crate::error::SourceError;

const ORIGIN: DataOrigin = DataOrigin::OpenMeteo;

const DAILY_FIELDS: &str = "temperature_2m_mean,cloud_cover_mean,weather_code";

/// Backend for the Open-Meteo archive API.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    client: reqwest::Client,
    api_url: String,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoSource {
    /// Create a client from its config section.
    pub fn new(config: &OpenMeteoConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
        }
    }

    /// Fetch the daily weather for `date`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the request fails, the status is not
    /// a success, or the body lacks the requested day.
    pub async fn fetch(&self, date: CalendarDate) -> Result<WeatherReport, SourceError> {
        let day = date.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
                ("daily", DAILY_FIELDS.to_owned()),
                ("timezone", "UTC".to_owned()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Http {
                origin: ORIGIN,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                origin: ORIGIN,
                status: status.as_u16(),
            });
        }

        let json: Value = response.json().await.map_err(|e| SourceError::Http {
            origin: ORIGIN,
            message: format!("response parse failed: {e}"),
        })?;

        parse_daily(&json)
    }
}

/// Extract the first day of a `daily` block.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] if any requested series is missing,
/// empty, null, or out of range.
pub fn parse_daily(json: &Value) -> Result<WeatherReport, SourceError> {
    let daily = json
        .get("daily")
        .ok_or_else(|| SourceError::malformed(ORIGIN, "response missing daily block"))?;

    let temperature = first_number(daily, "temperature_2m_mean")?;
    if !(-100.0..=100.0).contains(&temperature) {
        return Err(SourceError::malformed(
            ORIGIN,
            format!("temperature {temperature} out of range"),
        ));
    }
    let cloud_cover = first_number(daily, "cloud_cover_mean")?;
    let code = first_number(daily, "weather_code")?;

    Ok(WeatherReport {
        temperature_c: round_to_i32(temperature),
        conditions: condition_for_code(code)
            .ok_or_else(|| SourceError::malformed(ORIGIN, format!("unknown weather code {code}")))?,
        cloud_cover_pct: percent(cloud_cover),
        origin: ORIGIN,
    })
}

/// Map a WMO weather interpretation code to a display condition.
// Codes are small non-negative integers; anything else is rejected first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn condition_for_code(code: f64) -> Option<WeatherCondition> {
    if !(0.0..=99.0).contains(&code) || code.fract().abs() > f64::EPSILON {
        return None;
    }
    match code as u8 {
        0 | 1 => Some(WeatherCondition::Clear),
        2 => Some(WeatherCondition::PartlyCloudy),
        3 | 45 | 48 => Some(WeatherCondition::Cloudy),
        51..=67 | 80..=82 | 95..=99 => Some(WeatherCondition::Rain),
        71..=77 | 85 | 86 => Some(WeatherCondition::Snow),
        _ => None,
    }
}

fn first_number(daily: &Value, key: &str) -> Result<f64, SourceError> {
    daily
        .get(key)
        .and_then(|series| series.get(0))
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
        .ok_or_else(|| SourceError::malformed(ORIGIN, format!("daily.{key}[0] missing or null")))
}

// Callers bound the value to [-100, 100] first.
#[allow(clippy::cast_possible_truncation)]
fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

// Clamped to [0, 100] before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
