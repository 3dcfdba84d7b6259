//! # Location Resolver
//!
//! Retries a [`LocationProvider`] according to a [`RetryPolicy`] until it
//! succeeds, the policy runs out, or the caller's cancellation future fires.
//!
//! The default policy never runs out: the dashboard is useless without a
//! location, so startup keeps asking. Cancellation (Ctrl+C in the binary) is
//! raced against every attempt and every back-off sleep, so the wait is
//! always interruptible.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::core::state::Location;
use crate::geo::{GeoError, LocationProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Pause between attempts. Zero retries immediately.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_attempts: None,
            delay,
        }
    }

    pub fn bounded(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            delay,
        }
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn allows_retry(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::ZERO)
    }
}

#[derive(Debug)]
pub enum ResolveError {
    /// The cancellation future completed first.
    Cancelled,
    /// A bounded policy ran out of attempts.
    Exhausted { attempts: u32, last: GeoError },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Cancelled => write!(f, "location lookup cancelled"),
            ResolveError::Exhausted { attempts, last } => {
                write!(f, "location lookup failed after {attempts} attempts: {last}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

pub struct LocationResolver {
    provider: Arc<dyn LocationProvider>,
    policy: RetryPolicy,
}

impl LocationResolver {
    pub fn new(provider: Arc<dyn LocationProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub async fn resolve<C>(&self, cancel: C) -> Result<Location, ResolveError>
    where
        C: Future<Output = ()>,
    {
        tokio::pin!(cancel);
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);

            let outcome = tokio::select! {
                biased;
                _ = &mut cancel => {
                    info!("Location lookup cancelled after {} attempt(s)", attempts - 1);
                    return Err(ResolveError::Cancelled);
                }
                outcome = self.provider.locate() => outcome,
            };

            let error = match outcome {
                Ok(location) => {
                    info!(
                        "Location resolved via {} after {} attempt(s)",
                        self.provider.name(),
                        attempts
                    );
                    return Ok(location);
                }
                Err(e) => e,
            };

            warn!(
                "Location attempt {} via {} failed: {}",
                attempts,
                self.provider.name(),
                error
            );

            if !self.policy.allows_retry(attempts) {
                return Err(ResolveError::Exhausted {
                    attempts,
                    last: error,
                });
            }

            if self.policy.delay.is_zero() {
                // Give the runtime a chance to deliver the cancellation.
                tokio::task::yield_now().await;
            } else {
                tokio::select! {
                    biased;
                    _ = &mut cancel => {
                        info!("Location lookup cancelled after {} attempt(s)", attempts);
                        return Err(ResolveError::Cancelled);
                    }
                    _ = tokio::time::sleep(self.policy.delay) => {}
                }
            }
        }
    }
}
