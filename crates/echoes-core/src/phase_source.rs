//! Remote moon-phase sources.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible. The local calculator is not a variant here: it is
//! the resolver's unconditional last step, not something that can fail.

use std::time::Duration;

use echoes_types::{CalendarDate, DataOrigin, LunarPhaseDescriptor};

use crate::error::SourceError;
use crate::farmsense::FarmSenseSource;

/// A source that may be able to supply the phase for a date.
#[derive(Debug, Clone)]
pub enum PhaseSource {
    /// The `FarmSense` moon phase API.
    FarmSense(FarmSenseSource),
    /// A fixed answer, for tests and offline drills.
    Stub(StubPhaseSource),
}

impl PhaseSource {
    /// Ask the source for the phase on `date`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing why this source could not answer.
    pub async fn fetch(&self, date: CalendarDate) -> Result<LunarPhaseDescriptor, SourceError> {
        match self {
            Self::FarmSense(source) => source.fetch(date).await,
            Self::Stub(source) => source.fetch().await,
        }
    }

    /// The provenance tag for values from this source.
    pub const fn origin(&self) -> DataOrigin {
        match self {
            Self::FarmSense(_) => DataOrigin::FarmSense,
            Self::Stub(_) => DataOrigin::Stub,
        }
    }
}

/// Answers with a fixed descriptor, or fails, after an optional delay.
#[derive(Debug, Clone)]
pub struct StubPhaseSource {
    answer: Option<LunarPhaseDescriptor>,
    delay: Duration,
}

impl StubPhaseSource {
    /// A stub that always answers with `descriptor`.
    pub const fn answering(descriptor: LunarPhaseDescriptor) -> Self {
        Self {
            answer: Some(descriptor),
            delay: Duration::ZERO,
        }
    }

    /// A stub that always fails.
    pub const fn failing() -> Self {
        Self {
            answer: None,
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn fetch(&self) -> Result<LunarPhaseDescriptor, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer.ok_or_else(|| SourceError::Unavailable {
            origin: DataOrigin::Stub,
            reason: "stub configured to fail".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use echoes_types::PhaseName;

    use super::*;

    fn descriptor() -> LunarPhaseDescriptor {
        LunarPhaseDescriptor {
            phase_name: PhaseName::LastQuarter,
            illumination: 0.5,
            age_days: 22.1,
            phase_angle: 269.4,
        }
    }

    #[tokio::test]
    async fn answering_stub_returns_descriptor() {
        let source = PhaseSource::Stub(StubPhaseSource::answering(descriptor()));
        let result = source.fetch(CalendarDate::from_parts(2001, 5, 5)).await;
        assert_eq!(result, Ok(descriptor()));
        assert_eq!(source.origin(), DataOrigin::Stub);
    }

    #[tokio::test]
    async fn failing_stub_is_unavailable() {
        let source = PhaseSource::Stub(StubPhaseSource::failing());
        let result = source.fetch(CalendarDate::from_parts(2001, 5, 5)).await;
        assert!(matches!(result, Err(SourceError::Unavailable { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_honored() {
        let source = StubPhaseSource::answering(descriptor()).with_delay(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        let _ = source.fetch().await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
