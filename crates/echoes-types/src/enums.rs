//! Enumeration types for the Echoes service.
//!
//! The eight lunar phases, the five weather conditions the pages know how
//! to render, and the provenance tag attached to every sourced value.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Lunar phases
// ---------------------------------------------------------------------------

/// One of the eight named phases of the synodic cycle.
///
/// Variants are declared in cycle order starting at the new moon, so the
/// discriminant doubles as the phase index `floor(cycle_fraction * 8)`.
/// Serialized using the human label (`"Waxing Crescent"`), which is the
/// form the pages and remote sources use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PhaseName {
    /// Start of the cycle; the lit side faces away from Earth.
    #[serde(rename = "New Moon")]
    NewMoon,
    /// A thin, growing sliver.
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    /// Half of the disk lit, growing.
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    /// More than half lit, growing.
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    /// The whole disk lit.
    #[serde(rename = "Full Moon")]
    FullMoon,
    /// More than half lit, shrinking.
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    /// Half of the disk lit, shrinking.
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    /// A thin, shrinking sliver.
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

/// The ordered phase table. `PHASE_NAMES[i]` is the phase for index `i`.
pub const PHASE_NAMES: [PhaseName; PhaseName::COUNT] = PhaseName::ALL;

impl PhaseName {
    /// Number of named phases.
    pub const COUNT: usize = 8;

    /// All phases in cycle order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Return the phase at `index mod COUNT`.
    pub const fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::NewMoon,
            1 => Self::WaxingCrescent,
            2 => Self::FirstQuarter,
            3 => Self::WaxingGibbous,
            4 => Self::FullMoon,
            5 => Self::WaningGibbous,
            6 => Self::LastQuarter,
            _ => Self::WaningCrescent,
        }
    }

    /// Position of this phase in [`PhaseName::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one, wrapping from waning crescent to
    /// new moon.
    pub const fn next(self) -> Self {
        Self::from_index(self.index().wrapping_add(1))
    }

    /// Human-readable label, e.g. `"First Quarter"`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Parse a label back into a phase.
    ///
    /// Matching ignores case, surrounding whitespace, and the separator
    /// between words (`"waxing-crescent"`, `"Waxing  Crescent"`), since
    /// remote sources are not consistent about it.
    pub fn parse_label(label: &str) -> Option<Self> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|phase| normalize_label(phase.label()) == wanted)
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Sky conditions shown next to the moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum WeatherCondition {
    /// No cloud to speak of.
    Clear,
    /// Broken cloud.
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    /// Overcast, including fog.
    Cloudy,
    /// Any liquid precipitation, drizzle through thunderstorms.
    Rain,
    /// Any frozen precipitation.
    Snow,
}

impl WeatherCondition {
    /// All conditions, in the order the synthetic source draws from.
    pub const ALL: [Self; 5] = [
        Self::Clear,
        Self::PartlyCloudy,
        Self::Cloudy,
        Self::Rain,
        Self::Snow,
    ];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Which source produced a value in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// The local moon-phase calculator.
    Calculated,
    /// The `FarmSense` moon phase API.
    FarmSense,
    /// The Open-Meteo historical weather archive.
    OpenMeteo,
    /// The seeded synthetic weather generator.
    Synthetic,
    /// The NASA image library search API.
    NasaImages,
    /// The built-in phase image catalog.
    Catalog,
    /// A fixed stub source (tests, offline drills).
    Stub,
}

impl DataOrigin {
    /// Short identifier used in logs and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calculated => "calculated",
            Self::FarmSense => "farm_sense",
            Self::OpenMeteo => "open_meteo",
            Self::Synthetic => "synthetic",
            Self::NasaImages => "nasa_images",
            Self::Catalog => "catalog",
            Self::Stub => "stub",
        }
    }

    /// Whether the value came over the network.
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::FarmSense | Self::OpenMeteo | Self::NasaImages)
    }
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
