//! Per-client request ceiling
//!
//! Backed by a keyed `governor` limiter (GCRA): each client key may burst up
//! to `max_requests` and regains capacity at `max_requests / window_secs`.

use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};

use crate::config::RateLimitConfig;

/// Number of tracked clients above which idle entries are pruned
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Clone)]
pub struct ClientRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    max_requests: u32,
}

impl ClientRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(config.window_secs)
            .checked_div(burst.get())
            .filter(|p| !p.is_zero())
            .unwrap_or(Duration::from_millis(1));

        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            max_requests: burst.get(),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Record one request for `client`. On rejection returns the number of
    /// seconds until the next request would be accepted (at least 1).
    pub fn check(&self, client: &str) -> Result<(), u64> {
        let outcome = match self.limiter.check_key(&client.to_string()) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(DefaultClock::default().now());
                Err(wait.as_secs().max(1))
            }
        };

        if self.limiter.len() > PRUNE_THRESHOLD {
            self.limiter.retain_recent();
        }

        outcome
    }
}
