//! Shared utilities for use cases.
//!
//! Cancellation checks and time budgets for the two suspension points of a
//! turn: model calls and tool executions.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Whether cancellation has been requested on an optional token.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(CancellationToken::is_cancelled)
}

/// Run `fut` within `limit`, if any. `Err` carries the exceeded limit.
pub(crate) async fn with_timeout<F, T>(limit: Option<Duration>, fut: F) -> Result<T, Duration>
where
    F: Future<Output = T>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| limit),
        None => Ok(fut.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cancelled() {
        assert!(!is_cancelled(&None));
        let token = CancellationToken::new();
        assert!(!is_cancelled(&Some(token.clone())));
        token.cancel();
        assert!(is_cancelled(&Some(token)));
    }

    #[tokio::test]
    async fn test_with_timeout() {
        assert_eq!(with_timeout(None, async { 7 }).await, Ok(7));
        assert_eq!(
            with_timeout(Some(Duration::from_secs(1)), async { 7 }).await,
            Ok(7)
        );
        let slow = tokio::time::sleep(Duration::from_secs(5));
        assert_eq!(
            with_timeout(Some(Duration::from_millis(10)), slow).await,
            Err(Duration::from_millis(10))
        );
    }
}
