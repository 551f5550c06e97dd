//! Request throttle
//!
//! Enforces a minimum spacing between the *start* of consecutive upstream
//! requests. A caller that arrives after the interval has already elapsed
//! proceeds immediately.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Minimum inter-request spacing
#[derive(Debug)]
pub struct Throttle {
    /// Required gap between two request starts
    min_interval: Duration,

    /// When the previous request was let through
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// A throttle that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may start, then claim the slot
    pub async fn acquire(&self) {
        // Holding the lock across the sleep serialises waiters
        let mut last = self.last.lock().await;

        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!("throttle: waiting {:?}", wait);
                sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}
