//! Calendar date to Julian Day Number.
//!
//! Uses the standard Fliegel/Van Flandern style integer conversion for the
//! proleptic Gregorian calendar. Every division is floored (toward negative
//! infinity) so dates before the epoch shift still count continuously.
//! The result is a whole day number: no half-day noon offset is applied.

use echoes_types::CalendarDate;

/// Years added before conversion so the March-based year stays positive
/// for every date after 4801 BCE.
const EPOCH_SHIFT_YEARS: i64 = 4800;

/// Day-number offset of the shifted epoch.
const EPOCH_OFFSET_DAYS: i64 = 32_045;

/// Convert a calendar date to its Julian Day Number.
///
/// The year is counted from March so February's leap day falls at the end:
///
/// ```text
/// a  = floor((14 - month) / 12)
/// y  = year + 4800 - a
/// m  = month + 12a - 3
/// jd = day + floor((153m + 2) / 5) + 365y + floor(y/4) - floor(y/100) + floor(y/400) - 32045
/// ```
///
/// Total over every input: the date is not validated, and all arithmetic
/// is done in `i64` widened from the `i32`/`u32` fields, which leaves
/// several orders of magnitude of headroom (the saturating operations
/// never saturate).
pub fn julian_day_number(date: CalendarDate) -> i64 {
    let year = i64::from(date.year);
    let month = i64::from(date.month);
    let day = i64::from(date.day);

    let a = 14_i64.saturating_sub(month).div_euclid(12);
    let y = year.saturating_add(EPOCH_SHIFT_YEARS).saturating_sub(a);
    let m = month.saturating_add(a.saturating_mul(12)).saturating_sub(3);

    let month_days = m.saturating_mul(153).saturating_add(2).div_euclid(5);

    day.saturating_add(month_days)
        .saturating_add(y.saturating_mul(365))
        .saturating_add(y.div_euclid(4))
        .saturating_sub(y.div_euclid(100))
        .saturating_add(y.div_euclid(400))
        .saturating_sub(EPOCH_OFFSET_DAYS)
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn jdn(year: i32, month: u32, day: u32) -> i64 {
        julian_day_number(CalendarDate::from_parts(year, month, day))
    }

    #[test]
    fn j2000_epoch() {
        assert_eq!(jdn(2000, 1, 1), 2_451_545);
    }

    #[test]
    fn reference_new_moon_day() {
        assert_eq!(jdn(2000, 1, 6), 2_451_550);
    }

    #[test]
    fn modified_julian_epoch() {
        // MJD 0 is 1858-11-17.
        assert_eq!(jdn(1858, 11, 17), 2_400_001);
    }

    #[test]
    fn proleptic_day_zero() {
        // JDN 0 is 24 November 4714 BCE in the proleptic Gregorian calendar.
        assert_eq!(jdn(-4713, 11, 24), 0);
    }

    #[test]
    fn leap_day_and_march_first_are_consecutive() {
        assert_eq!(jdn(2024, 3, 1) - jdn(2024, 2, 29), 1);
        assert_eq!(jdn(2023, 3, 1) - jdn(2023, 2, 28), 1);
    }

    #[test]
    fn century_rules() {
        // 1900 is not a leap year, 2000 is.
        assert_eq!(jdn(1901, 1, 1) - jdn(1900, 1, 1), 365);
        assert_eq!(jdn(2001, 1, 1) - jdn(2000, 1, 1), 366);
    }

    #[test]
    fn year_boundary_is_continuous() {
        assert_eq!(jdn(2000, 1, 1) - jdn(1999, 12, 31), 1);
    }

    #[test]
    fn far_past_years_floor_correctly() {
        // Below the epoch shift, y goes negative and the floored divisions
        // must keep the count continuous.
        assert_eq!(jdn(-5000, 1, 1) - jdn(-5001, 12, 31), 1);
        assert!(jdn(-10_000, 6, 1) < 0);
    }

    #[test]
    fn extreme_years_do_not_panic() {
        let _ = jdn(i32::MAX, 12, 31);
        let _ = jdn(i32::MIN, 1, 1);
    }
}
