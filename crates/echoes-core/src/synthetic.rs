//! Seeded synthetic weather.
//!
//! The generator is the weather chain's terminal source, so it cannot fail.
//! Each date gets its own `StdRng` seeded from `(seed, julian_day_number)`:
//! the same seed and date always produce the same weather, and nearby
//! dates are unrelated.

use echoes_lunar::julian_day_number;
use echoes_types::{CalendarDate, DataOrigin, WeatherCondition, WeatherReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lowest generated temperature, in degrees Celsius.
pub const MIN_TEMPERATURE_C: i32 = 5;

/// Highest generated temperature, in degrees Celsius.
pub const MAX_TEMPERATURE_C: i32 = 34;

/// Highest generated cloud cover percentage.
pub const MAX_CLOUD_COVER_PCT: u8 = 99;

/// Deterministic per-date weather generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticWeather {
    seed: u64,
}

impl SyntheticWeather {
    /// Create a generator with the given seed.
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The generator's seed.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Weather for `date`.
    pub fn generate(&self, date: CalendarDate) -> WeatherReport {
        let mut rng = StdRng::seed_from_u64(mix_seed(self.seed, julian_day_number(date)));

        let conditions = WeatherCondition::ALL
            .get(rng.random_range(0..WeatherCondition::ALL.len()))
            .copied()
            .unwrap_or(WeatherCondition::Clear);
        let temperature_c = rng.random_range(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C);
        let cloud_cover_pct = rng.random_range(0..=MAX_CLOUD_COVER_PCT);

        WeatherReport {
            temperature_c,
            conditions,
            cloud_cover_pct,
            origin: DataOrigin::Synthetic,
        }
    }
}

/// Combine the seed and day number into one RNG seed.
fn mix_seed(seed: u64, day: i64) -> u64 {
    let day_bits = u64::from_ne_bytes(day.to_ne_bytes());
    seed ^ day_bits.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(29)
}
