use log::debug;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Calls allowed per window when polling mower status.
pub const STATUS_CALLS_PER_PERIOD: usize = 2;
/// Length of the status polling window.
pub const STATUS_PERIOD: Duration = Duration::from_secs(60);

/// Rolling-window limiter that waits instead of failing.
///
/// Clones share the same window, which is how several pollers can be made to
/// draw from one budget. [`RateLimiter::new`] always starts a fresh window.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    calls: usize,
    period: Duration,
    history: Arc<Mutex<VecDeque<Instant>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(STATUS_CALLS_PER_PERIOD, STATUS_PERIOD)
    }
}

impl RateLimiter {
    pub fn new(calls: usize, period: Duration) -> Self {
        let calls = calls.max(1);
        Self {
            calls,
            period,
            history: Arc::new(Mutex::new(VecDeque::with_capacity(calls))),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait until one more call fits in the trailing window, then record it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut history = self.history.lock().await;
                let now = Instant::now();
                while let Some(&oldest) = history.front() {
                    if now.duration_since(oldest) >= self.period {
                        history.pop_front();
                    } else {
                        break;
                    }
                }

                if history.len() < self.calls {
                    history.push_back(now);
                    return;
                }

                match history.front() {
                    Some(&oldest) => self.period.saturating_sub(now.duration_since(oldest)),
                    None => Duration::ZERO,
                }
            };

            debug!("Rate limit of {} calls reached, waiting {:?}", self.calls, wait);
            sleep(wait).await;
        }
    }
}
