//! Shared type definitions for the Echoes moon-phase service.
//!
//! This crate is the single source of truth for the records exchanged
//! between the calculator, the data sources, and the pages. Types flow
//! to `TypeScript` via `ts-rs` for the page scripts.
//!
//! # Modules
//!
//! - [`enums`] -- Phase names, weather conditions, data provenance
//! - [`structs`] -- Calendar date, phase descriptor, weather and report records

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DataOrigin, PHASE_NAMES, PhaseName, WeatherCondition};
pub use structs::{
    CalendarDate, CurrentMoon, LunarPhaseDescriptor, MoonReport, PhaseCard, ResolvedPhase, WeatherReport,
};
