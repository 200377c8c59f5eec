//! Client for the `FarmSense` moon phase API.
//!
//! The API takes a unix timestamp (`?d=...`) and answers with a JSON array
//! of phase records. The record whose timestamp is closest to the request
//! wins. Records look like:
//!
//! ```json
//! [{"Error": 0, "TargetDate": "947116800", "Phase": "New Moon",
//!   "Illumination": 0.01, "Age": 0.6}]
//! ```
//!
//! `Illumination` falls back to `1.0` when absent. When `Age` is absent the
//! distance between the request and the record's timestamp is used
//! instead. The phase name and angle always follow from the normalized
//! age; the remote `Phase` label is only checked, never trusted.

use chrono::NaiveTime;
use echoes_lunar::phase_from_days;
use echoes_types::{CalendarDate, DataOrigin, LunarPhaseDescriptor, PhaseName};
use serde_json::Value;
use tracing::debug;

use crate::config::FarmSenseConfig;
use crate::error::SourceError;

const ORIGIN: DataOrigin = DataOrigin::FarmSense;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Backend for the `FarmSense` moon phase API.
#[derive(Debug, Clone)]
pub struct FarmSenseSource {
    client: reqwest::Client,
    api_url: String,
}

impl FarmSenseSource {
    /// Create a client from its config section.
    pub fn new(config: &FarmSenseConfig) -> Self {
        Self::with_url(config.api_url.clone())
    }

    /// Create a client against an explicit endpoint.
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    /// The configured endpoint.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the phase for `date`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the request fails, the status is not
    /// a success, or no usable record comes back.
    pub async fn fetch(&self, date: CalendarDate) -> Result<LunarPhaseDescriptor, SourceError> {
        let target = target_timestamp(date)
            .ok_or_else(|| SourceError::malformed(ORIGIN, format!("{date} is not a calendar date")))?;

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("d", target)])
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

        parse_response(&json, target)
    }
}

/// Unix seconds at midnight UTC on `date`.
pub fn target_timestamp(date: CalendarDate) -> Option<i64> {
    date.to_naive()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp())
}

/// Turn a `FarmSense` response body into a descriptor for `target`.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] if the body holds no records, the
/// chosen record reports an error, or its fields are out of range.
pub fn parse_response(json: &Value, target: i64) -> Result<LunarPhaseDescriptor, SourceError> {
    let records: Vec<&Value> = match json {
        Value::Array(items) => items.iter().filter(|v| v.is_object()).collect(),
        Value::Object(_) => vec![json],
        _ => Vec::new(),
    };

    let record = records
        .into_iter()
        .min_by_key(|record| {
            record_timestamp(record).map_or(u64::MAX, |ts| ts.abs_diff(target))
        })
        .ok_or_else(|| SourceError::malformed(ORIGIN, "response holds no phase records"))?;

    if let Some(code) = number_field(record, "Error").filter(|code| code.abs() > f64::EPSILON) {
        let message = record
            .get("ErrorMsg")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Err(SourceError::malformed(
            ORIGIN,
            format!("record reports error {code}: {message}"),
        ));
    }

    let reported = match record.get("Phase").and_then(Value::as_str) {
        None => None,
        Some(label) => Some(
            parse_phase_label(label)
                .ok_or_else(|| SourceError::malformed(ORIGIN, format!("unknown phase '{label}'")))?,
        ),
    };

    let illumination = match number_field(record, "Illumination") {
        None => 1.0,
        Some(value) if (0.0..=1.0).contains(&value) => value,
        Some(value) => {
            return Err(SourceError::malformed(
                ORIGIN,
                format!("illumination {value} outside [0, 1]"),
            ));
        }
    };

    let raw_age = number_field(record, "Age")
        .filter(|age| age.is_finite() && *age >= 0.0)
        .or_else(|| record_timestamp(record).map(|ts| days_between(target, ts)))
        .ok_or_else(|| SourceError::malformed(ORIGIN, "record has neither Age nor a timestamp"))?;

    let derived = phase_from_days(raw_age);
    if let Some(label) = reported.filter(|name| *name != derived.phase_name) {
        debug!(
            reported = %label,
            derived = %derived.phase_name,
            age_days = derived.age_days,
            "remote phase label disagrees with age, using age"
        );
    }

    Ok(LunarPhaseDescriptor {
        illumination,
        ..derived
    })
}

/// Phase labels as `FarmSense` writes them, including its ordinal quarters.
fn parse_phase_label(label: &str) -> Option<PhaseName> {
    match label.trim().to_ascii_lowercase().as_str() {
        "1st quarter" => Some(PhaseName::FirstQuarter),
        "3rd quarter" | "third quarter" => Some(PhaseName::LastQuarter),
        _ => PhaseName::parse_label(label),
    }
}

/// The record's own timestamp, from `TargetDate` or `Timestamp`.
// Timestamps are whole seconds; fractional parts are dropped.
#[allow(clippy::cast_possible_truncation)]
fn record_timestamp(record: &Value) -> Option<i64> {
    number_field(record, "TargetDate")
        .or_else(|| number_field(record, "Timestamp"))
        .filter(|ts| ts.is_finite() && ts.abs() < 1e15)
        .map(|ts| ts as i64)
}

/// Absolute distance between two unix timestamps, in days.
// Timestamps are below 1e15, well inside f64's exact integer range.
#[allow(clippy::cast_precision_loss)]
fn days_between(a: i64, b: i64) -> f64 {
    a.abs_diff(b) as f64 / SECONDS_PER_DAY
}

/// Read a numeric field that may be encoded as a JSON number or string.
fn number_field(record: &Value, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
}
