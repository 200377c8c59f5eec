//! Record types shared between the calculator, the data sources, and the
//! pages: the input date, the phase descriptor, weather, and the assembled
//! report.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DataOrigin, PhaseName, WeatherCondition};

// ---------------------------------------------------------------------------
// CalendarDate
// ---------------------------------------------------------------------------

/// A proleptic Gregorian calendar date.
///
/// The calculator treats this as already validated and never checks it;
/// use [`CalendarDate::new`] at input boundaries to reject impossible
/// dates such as February 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CalendarDate {
    /// Astronomical year; may be zero or negative.
    pub year: i32,
    /// Month of the year, 1 through 12.
    pub month: u32,
    /// Day of the month, 1 through 31.
    pub day: u32,
}

impl CalendarDate {
    /// Build a date, returning `None` unless it names a real calendar day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// Build a date without validation.
    pub const fn from_parts(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Convert to a `chrono` date, if this is a real calendar day.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

// ---------------------------------------------------------------------------
// LunarPhaseDescriptor
// ---------------------------------------------------------------------------

/// Where the moon is in its synodic cycle on a given date.
///
/// Produced fresh by every calculation, and by every remote source, with
/// `phase_angle == age_days / SYNODIC_MONTH_DAYS * 360` and
/// `phase_name == PHASE_NAMES[floor(age_days / SYNODIC_MONTH_DAYS * 8) mod 8]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LunarPhaseDescriptor {
    /// Named phase.
    pub phase_name: PhaseName,
    /// Fraction of the disk treated as lit, in `[0, 1]`.
    pub illumination: f64,
    /// Days since the most recent new moon, in `[0, 29.53059)`.
    pub age_days: f64,
    /// Degrees of progress through the cycle, in `[0, 360)`.
    pub phase_angle: f64,
}

/// A phase descriptor tagged with the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResolvedPhase {
    /// The phase data.
    pub descriptor: LunarPhaseDescriptor,
    /// Which source produced it.
    pub origin: DataOrigin,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather shown alongside the moon for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeatherReport {
    /// Mean air temperature in degrees Celsius.
    pub temperature_c: i32,
    /// Sky conditions.
    pub conditions: WeatherCondition,
    /// Cloud cover percentage, 0 through 100.
    pub cloud_cover_pct: u8,
    /// Which source produced it.
    pub origin: DataOrigin,
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// One entry of the eight-phase display table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PhaseCard {
    /// The phase.
    pub phase: PhaseName,
    /// Display label.
    pub label: String,
    /// Single-glyph emoji for the phase.
    pub emoji: String,
    /// Image shown for the phase.
    pub image_url: String,
}

/// Everything the results page shows for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MoonReport {
    /// The requested date.
    pub date: CalendarDate,
    /// The moon phase and where it came from.
    pub phase: ResolvedPhase,
    /// The weather and where it came from.
    pub weather: WeatherReport,
    /// Image for the phase.
    pub image_url: String,
    /// Which source supplied the image.
    pub image_origin: DataOrigin,
    /// One-sentence summary, e.g. "On Thursday, January 6, 2000, the moon
    /// was in its new moon phase."
    pub description: String,
    /// Suggested file name for downloading the image.
    pub download_name: String,
}

/// The moon as of today, for the landing page widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CurrentMoon {
    /// Today's date on the server.
    pub date: CalendarDate,
    /// Today's phase and where it came from.
    pub phase: ResolvedPhase,
    /// Image for the phase.
    pub image_url: String,
    /// Which source supplied the image.
    pub image_origin: DataOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_impossible_dates() {
        assert!(CalendarDate::new(2023, 2, 29).is_none());
        assert!(CalendarDate::new(2023, 13, 1).is_none());
        assert!(CalendarDate::new(2024, 2, 29).is_some());
    }

    #[test]
    fn from_parts_skips_validation() {
        let date = CalendarDate::from_parts(2023, 2, 30);
        assert_eq!(date.day, 30);
        assert!(date.to_naive().is_none());
    }

    #[test]
    fn display_is_iso_like() {
        let date = CalendarDate::from_parts(2000, 1, 6);
        assert_eq!(date.to_string(), "2000-01-06");
    }

    #[test]
    fn naive_round_trip() {
        let naive = NaiveDate::from_ymd_opt(1969, 7, 20);
        assert!(naive.is_some());
        if let Some(naive) = naive {
            let date = CalendarDate::from(naive);
            assert_eq!(date.to_naive(), Some(naive));
        }
    }

    #[test]
    fn descriptor_serializes_with_label() {
        let descriptor = LunarPhaseDescriptor {
            phase_name: PhaseName::FullMoon,
            illumination: 1.0,
            age_days: 14.75,
            phase_angle: 179.8,
        };
        let value = serde_json::to_value(descriptor).unwrap_or_default();
        assert_eq!(value["phase_name"], "Full Moon");
        assert_eq!(value["age_days"], 14.75);
    }
}
