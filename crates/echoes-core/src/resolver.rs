//! Phase resolution: remote sources in order, then the local calculator.
//!
//! Each attempt runs under its own `tokio::time::timeout`. The first
//! success wins. Failures and timeouts are logged and skipped, and when
//! every attempt is exhausted the calculator answers. Resolution therefore
//! never fails.

use echoes_lunar::compute_phase;
use echoes_types::{CalendarDate, DataOrigin, ResolvedPhase};
use tracing::{debug, warn};

use crate::attempt::{SourceAttempt, bounded};
use crate::config::EchoesConfig;
use crate::farmsense::FarmSenseSource;
use crate::phase_source::PhaseSource;

/// One remote phase source and its deadline.
pub type PhaseAttempt = SourceAttempt<PhaseSource>;

/// Ordered phase sources ending in the local calculator.
#[derive(Debug, Clone, Default)]
pub struct PhaseResolver {
    attempts: Vec<PhaseAttempt>,
}

impl PhaseResolver {
    /// A resolver with no remote sources; always calculates locally.
    pub const fn local_only() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    /// A resolver that tries `attempts` in order before calculating.
    pub const fn new(attempts: Vec<PhaseAttempt>) -> Self {
        Self { attempts }
    }

    /// Build the chain described by the `phase` config section.
    pub fn from_config(config: &EchoesConfig) -> Self {
        let mut resolver = Self::local_only();
        let farmsense = &config.phase.farmsense;
        if farmsense.enabled {
            resolver.push(PhaseAttempt::with_timeout_ms(
                PhaseSource::FarmSense(FarmSenseSource::new(farmsense)),
                farmsense.timeout_ms,
            ));
        }
        resolver
    }

    /// Append an attempt to the end of the chain.
    pub fn push(&mut self, attempt: PhaseAttempt) {
        self.attempts.push(attempt);
    }

    /// Number of remote attempts before the calculator.
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Whether the chain is calculator-only.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Resolve the phase for `date`.
    pub async fn resolve(&self, date: CalendarDate) -> ResolvedPhase {
        for attempt in &self.attempts {
            let origin = attempt.source.origin();
            match bounded(origin, attempt.timeout, attempt.source.fetch(date)).await {
                Ok(descriptor) => {
                    debug!(%date, %origin, phase = %descriptor.phase_name, "phase resolved");
                    return ResolvedPhase { descriptor, origin };
                }
                Err(e) => {
                    warn!(%date, %origin, error = %e, "phase source failed, trying next");
                }
            }
        }

        let descriptor = compute_phase(date);
        debug!(%date, phase = %descriptor.phase_name, "phase calculated locally");
        ResolvedPhase {
            descriptor,
            origin: DataOrigin::Calculated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builds_farmsense_attempt() {
        let config = EchoesConfig::default();
        assert_eq!(PhaseResolver::from_config(&config).len(), 1);
    }

    #[test]
    fn offline_config_is_local_only() {
        let mut config = EchoesConfig::default();
        config.disable_remote_sources();
        assert!(PhaseResolver::from_config(&config).is_empty());
    }

    #[tokio::test]
    async fn empty_chain_calculates() {
        let date = CalendarDate::from_parts(2000, 1, 6);
        let resolved = PhaseResolver::local_only().resolve(date).await;
        assert_eq!(resolved.origin, DataOrigin::Calculated);
        assert_eq!(resolved.descriptor, compute_phase(date));
    }
}
