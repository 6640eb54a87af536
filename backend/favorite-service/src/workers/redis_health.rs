//! Redis Connection Health Check Background Job
//!
//! Pings the vote cache on an interval so the multiplexed connection stays
//! warm and a broken one is noticed (and reconnected by `ConnectionManager`)
//! before a favorite request has to fall back to the vote log.

use crate::cache::VoteCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Failures in a row before the log level escalates to error
const MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// Configuration for Redis health checks
#[derive(Clone)]
pub struct RedisHealthConfig {
    pub enabled: bool,
    pub check_interval: Duration,
    pub initial_delay: Duration,
}

impl Default for RedisHealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval: Duration::from_secs(60),
            initial_delay: Duration::from_secs(10),
        }
    }
}

/// Tracks consecutive ping failures
#[derive(Debug, Default)]
pub struct HealthState {
    consecutive_failures: u32,
}

impl HealthState {
    /// Record one probe result and log the transition
    pub fn observe<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => {
                if self.consecutive_failures > 0 {
                    tracing::info!(
                        previous_failures = self.consecutive_failures,
                        "Redis connection recovered"
                    );
                }
                self.consecutive_failures = 0;
                tracing::debug!("Redis health check: OK");
            }
            Err(e) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    tracing::error!(
                        consecutive_failures = self.consecutive_failures,
                        error = %e,
                        "Redis health check: CRITICAL - multiple consecutive failures"
                    );
                } else {
                    tracing::warn!(
                        consecutive_failures = self.consecutive_failures,
                        error = %e,
                        "Redis health check: FAILED"
                    );
                }
            }
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

/// Start the Redis health check background job; runs until the task is dropped
pub async fn start_redis_health_check(cache: Arc<dyn VoteCache>, config: RedisHealthConfig) {
    if !config.enabled {
        tracing::info!("Redis health check disabled by configuration");
        return;
    }

    tracing::info!(
        interval_secs = config.check_interval.as_secs(),
        "Starting Redis health check background job for favorite-service"
    );

    sleep(config.initial_delay).await;

    let mut state = HealthState::default();
    loop {
        state.observe(cache.ping().await);
        sleep(config.check_interval).await;
    }
}
