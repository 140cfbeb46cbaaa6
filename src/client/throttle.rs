//! Request throttling
//!
//! Enforces a minimum interval between outbound API calls, derived from a
//! requests-per-minute budget.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Time-based throttler enforcing a maximum request rate per minute
///
/// The last permitted call is kept behind an async mutex, so concurrent
/// callers serialize through [`RequestThrottler::acquire`] without
/// exceeding the budget.
#[derive(Debug)]
pub struct RequestThrottler {
    rate_per_minute: u32,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestThrottler {
    /// Creates a throttler for the given budget
    ///
    /// Budgets below 1 are clamped to 1.
    pub fn new(rate_per_minute: i64) -> Self {
        let rate_per_minute = u32::try_from(rate_per_minute.max(1)).unwrap_or(u32::MAX);
        Self {
            rate_per_minute,
            min_interval: Duration::from_secs(60) / rate_per_minute,
            last_request: Mutex::new(None),
        }
    }

    pub fn rate_per_minute(&self) -> u32 {
        self.rate_per_minute
    }

    /// Minimum time between two permitted calls
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until a request is allowed under the budget
    ///
    /// The first call returns immediately. Later calls sleep for whatever
    /// remains of the minimum interval since the previous call.
    pub async fn acquire(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let sleep_for = self.min_interval - elapsed;
                tracing::debug!("Throttling for {:.3} seconds.", sleep_for.as_secs_f64());
                tokio::time::sleep(sleep_for).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Default for RequestThrottler {
    fn default() -> Self {
        Self::new(60)
    }
}
