//! Port for the simulated network latency in front of every lookup.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends a pending lookup before it resolves.
#[async_trait]
pub trait LatencySimulator: Send + Sync {
    /// Suspend execution for `duration`.
    ///
    /// ```rust,no_run
    /// use async_trait::async_trait;
    /// use concreds::domain::ports::LatencySimulator;
    /// use std::sync::{Arc, Mutex};
    /// use std::time::Duration;
    /// #[derive(Default)]
    /// struct CountingLatency {
    ///     calls: Arc<Mutex<u32>>,
    /// }
    /// #[async_trait]
    /// impl LatencySimulator for CountingLatency {
    ///     async fn delay(&self, _duration: Duration) {
    ///         *self.calls.lock().expect("calls mutex") += 1;
    ///     }
    /// }
    /// # async fn demo() {
    /// let latency = CountingLatency::default();
    /// latency.delay(Duration::from_millis(25)).await;
    /// assert_eq!(*latency.calls.lock().expect("calls mutex"), 1);
    /// # }
    /// ```
    async fn delay(&self, duration: Duration);
}

/// Tokio timer backed latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLatency;

#[async_trait]
impl LatencySimulator for TokioLatency {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Resolves lookups without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateLatency;

#[async_trait]
impl LatencySimulator for ImmediateLatency {
    async fn delay(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn tokio_latency_waits_for_duration() {
        let started = Instant::now();
        TokioLatency.delay(Duration::from_millis(1500)).await;
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_latency_does_not_advance_time() {
        let started = Instant::now();
        ImmediateLatency.delay(Duration::from_secs(60)).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
