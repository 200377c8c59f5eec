//! Deterministic moon-phase calculator for Echoes.
//!
//! Converts a calendar date into a position in the synodic cycle and
//! derives a named phase, a cosine-based illumination fraction, the moon's
//! age in days, and the phase angle. This is not an ephemeris: it uses the
//! mean synodic month from a single reference new moon (January 6, 2000)
//! and is accurate to roughly a day.
//!
//! The crate is pure. It performs no I/O, holds no state, and cannot
//! fail; it is safe to call from any number of threads.
//!
//! # Modules
//!
//! - [`julian`] -- Calendar date to Julian Day Number.
//! - [`phase`] -- Cycle normalization and the phase descriptor.
//!
//! # Example
//!
//! ```
//! use echoes_lunar::compute_phase;
//! use echoes_types::{CalendarDate, PhaseName};
//!
//! let descriptor = compute_phase(CalendarDate::from_parts(2000, 1, 6));
//! assert_eq!(descriptor.phase_name, PhaseName::NewMoon);
//! ```

pub mod julian;
pub mod phase;

pub use julian::julian_day_number;
pub use phase::{
    REFERENCE_NEW_MOON_JDN, SYNODIC_MONTH_DAYS, compute_phase, days_since_reference,
    normalize_age, phase_from_days, phase_index,
};
