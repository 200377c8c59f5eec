//! One entry of a data-source chain: a source plus its deadline.

use std::future::Future;
use std::time::Duration;

use echoes_types::DataOrigin;
use tokio::time::timeout;

use crate::error::SourceError;

/// A source to try, bounded by its own deadline.
#[derive(Debug, Clone)]
pub struct SourceAttempt<S> {
    /// The source.
    pub source: S,
    /// How long to wait for it before moving on.
    pub timeout: Duration,
}

impl<S> SourceAttempt<S> {
    /// Pair a source with a deadline.
    pub const fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Pair a source with a deadline given in milliseconds.
    pub const fn with_timeout_ms(source: S, timeout_ms: u64) -> Self {
        Self::new(source, Duration::from_millis(timeout_ms))
    }
}

/// Await `call`, turning an elapsed deadline into [`SourceError::Timeout`].
pub(crate) async fn bounded<T, F>(
    origin: DataOrigin,
    deadline: Duration,
    call: F,
) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    match timeout(deadline, call).await {
        Ok(result) => result,
        Err(_elapsed) => Err(SourceError::Timeout {
            origin,
            timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let result: Result<(), SourceError> = bounded(
            DataOrigin::Stub,
            Duration::from_millis(50),
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;
        assert_eq!(
            result,
            Err(SourceError::Timeout {
                origin: DataOrigin::Stub,
                timeout_ms: 50,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fast_call_passes_through() {
        let result = bounded(DataOrigin::Stub, Duration::from_millis(50), async { Ok(7_u8) }).await;
        assert_eq!(result, Ok(7));
    }
}
