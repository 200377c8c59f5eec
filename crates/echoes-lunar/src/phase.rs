//! Lunar-cycle position and the derived phase descriptor.
//!
//! The cycle position is the signed day offset from a reference new moon,
//! reduced modulo the mean synodic month. Everything else (phase name,
//! phase angle, illumination) is a fixed function of that position.

use std::f64::consts::PI;

use echoes_types::{CalendarDate, LunarPhaseDescriptor, PhaseName};

use crate::julian::julian_day_number;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_59;

/// Julian Day Number of the reference new moon, January 6, 2000.
pub const REFERENCE_NEW_MOON_JDN: f64 = 2_451_549.5;

/// Compute the moon phase for a calendar date.
///
/// Pure and total: no validation, no I/O, constant time. The same date
/// always yields a bit-identical descriptor.
pub fn compute_phase(date: CalendarDate) -> LunarPhaseDescriptor {
    phase_from_days(days_since_reference(date))
}

/// Signed days between the reference new moon and `date`.
///
/// Negative for dates before January 6, 2000. Not reduced modulo the
/// synodic month.
// A Julian Day Number is far below 2^53 for any i32 year, so the cast is exact.
#[allow(clippy::cast_precision_loss)]
pub fn days_since_reference(date: CalendarDate) -> f64 {
    julian_day_number(date) as f64 - REFERENCE_NEW_MOON_JDN
}

/// Reduce a signed day offset into `[0, SYNODIC_MONTH_DAYS)`.
///
/// The remainder keeps the sign of `days`, so negative remainders are
/// shifted up by one cycle. When that shift rounds to exactly one full
/// cycle the position wraps to 0. Non-finite input maps to 0.
pub fn normalize_age(days: f64) -> f64 {
    let mut normalized = days % SYNODIC_MONTH_DAYS;
    if normalized < 0.0 {
        normalized += SYNODIC_MONTH_DAYS;
    }
    if !normalized.is_finite() || normalized >= SYNODIC_MONTH_DAYS {
        return 0.0;
    }
    normalized.abs()
}

/// Index into the phase table for a position expressed as a fraction of
/// the cycle.
///
/// `floor(fraction * 8) mod 8`, then `abs(..) mod 8`, so a fraction that
/// lands exactly on 1.0 yields 0 and no input can produce an index
/// outside `0..8`.
// The value is in [0, 8) after the abs/rem steps; `as` saturates NaN to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn phase_index(cycle_fraction: f64) -> usize {
    let raw = (cycle_fraction * 8.0).floor() % 8.0;
    (raw.abs() as usize) % 8
}

/// Build the descriptor for a raw (unreduced) day offset from the
/// reference new moon.
///
/// Illumination is `|cos(2π · fraction)|`. This peaks at both new and
/// full moon and is kept as-is for output compatibility; it is not the
/// physical lit fraction `(1 - cos θ) / 2`.
pub fn phase_from_days(days: f64) -> LunarPhaseDescriptor {
    let age_days = normalize_age(days);
    let fraction = age_days / SYNODIC_MONTH_DAYS;

    LunarPhaseDescriptor {
        phase_name: PhaseName::from_index(phase_index(fraction)),
        illumination: (fraction * PI * 2.0).cos().abs(),
        age_days,
        phase_angle: fraction * 360.0,
    }
}
