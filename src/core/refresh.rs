//! # Weather Refresher
//!
//! Time-gated cache in front of the weather provider. Once per tick the loop
//! calls [`Refresher::maybe_refresh`] with the current wall-clock minute; the
//! provider is only contacted when a refresh is due.
//!
//! A refresh is due when there is nothing cached yet, after `invalidate()`,
//! or when the minute is a multiple of the interval that hasn't been used
//! yet. Seconds never enter the decision, so one qualifying minute yields at
//! most one attempt.

use log::{debug, info, warn};

use crate::core::state::WeatherSnapshot;
use crate::weather::WeatherError;

pub const DEFAULT_REFRESH_INTERVAL: u32 = 15;

/// Pure refresh decision.
///
/// `last_minute` is the minute of the previous attempt, `None` when nothing
/// has been attempted since startup or the last invalidation.
pub fn refresh_due(last_minute: Option<u32>, now_minute: u32, interval: u32) -> bool {
    match last_minute {
        None => true,
        Some(last) => now_minute != last && now_minute % interval.max(1) == 0,
    }
}

#[derive(Debug)]
pub struct Refresher {
    interval: u32,
    last_fetched_minute: Option<u32>,
    snapshot: Option<WeatherSnapshot>,
}

impl Refresher {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            last_fetched_minute: None,
            snapshot: None,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_fetched_minute(&self) -> Option<u32> {
        self.last_fetched_minute
    }

    /// Forces the next `maybe_refresh` to fetch regardless of the minute.
    pub fn invalidate(&mut self) {
        debug!("Weather cache invalidated");
        self.last_fetched_minute = None;
    }

    pub fn is_due(&self, now_minute: u32) -> bool {
        self.snapshot.is_none() || refresh_due(self.last_fetched_minute, now_minute, self.interval)
    }

    /// Calls `fetch` if a refresh is due and returns the current snapshot.
    ///
    /// On failure the previous snapshot stays current and the error is
    /// returned; the caller decides whether it is fatal (no snapshot yet) or
    /// just worth a log line.
    pub fn maybe_refresh<F>(
        &mut self,
        now_minute: u32,
        fetch: F,
    ) -> Result<&WeatherSnapshot, WeatherError>
    where
        F: FnOnce() -> Result<WeatherSnapshot, WeatherError>,
    {
        if self.is_due(now_minute) {
            info!("Refreshing weather at minute {now_minute} (interval {})", self.interval);
            // Stamp the attempt, not the success: a failing provider is
            // retried at the next qualifying minute, not on every tick.
            self.last_fetched_minute = Some(now_minute);
            match fetch() {
                Ok(snapshot) => {
                    debug!("Weather snapshot: {:?}", snapshot);
                    self.snapshot = Some(snapshot);
                }
                Err(e) => {
                    warn!("Weather refresh failed: {e}");
                    return Err(e);
                }
            }
        }

        // Only reachable without a snapshot if a fetch just failed above.
        self.snapshot.as_ref().ok_or(WeatherError::NoData)
    }
}

impl Default for Refresher {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}
