//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, drives the loop
//! controller, and translates crossterm events into `core::action::Command`
//! values.
//!
//! ## Loop
//!
//! Everything runs on one thread. Each tick:
//!
//! - refreshes weather if the minute gate allows it (blocking on the
//!   current-thread runtime, bounded by the fetch timeout)
//! - advances the spinner and redraws the whole screen
//! - waits up to `tick` for a single key or resize event
//!
//! Input is therefore unresponsive while a fetch is in flight. The fetch
//! timeout keeps that window short.

mod component;
pub mod components;
pub mod controller;
pub mod event;
pub mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::{debug, info};
use tokio::runtime::Runtime;

use crate::core::config::ResolvedConfig;
use crate::core::state::{Location, Phase};
use crate::tui::controller::{Controller, DashboardOptions, TickError};
use crate::weather::{Observation, WeatherError, WeatherProvider};

/// Hides the cursor for the lifetime of the dashboard and puts the terminal
/// back the way it was on drop, including on error paths.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Built first so an early `?` still restores the terminal on drop
        let guard = Self;
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (raw, alternate screen, hidden cursor)");
        Ok(guard)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
        ratatui::restore();
        info!("Terminal restored");
    }
}

/// Fetches current conditions for `location`, blocking the calling thread.
pub fn fetch_weather(
    runtime: &Runtime,
    provider: &dyn WeatherProvider,
    location: &Location,
    timeout: Duration,
) -> Result<Observation, WeatherError> {
    debug!(
        "Fetching weather via {} for ({}, {})",
        provider.name(),
        location.latitude,
        location.longitude
    );
    runtime.block_on(async {
        tokio::time::timeout(
            timeout,
            provider.current_weather(location.latitude, location.longitude),
        )
        .await
        .unwrap_or(Err(WeatherError::Timeout(timeout)))
    })
}

/// Runs the dashboard until the user quits.
///
/// `location` must already be resolved; the terminal is only put into raw
/// mode once there is something to show.
pub fn run(
    config: &ResolvedConfig,
    location: Location,
    runtime: &Runtime,
    provider: Arc<dyn WeatherProvider>,
) -> Result<(), TickError> {
    let mut controller = Controller::new(
        location,
        DashboardOptions {
            temp_unit: config.temp_unit,
            refresh_interval: config.refresh_interval,
        },
    );

    let mut terminal = ratatui::try_init().map_err(TickError::Io)?;
    let _terminal_mode_guard = TerminalModeGuard::new().map_err(TickError::Io)?;

    let size = terminal.size().map_err(TickError::Io)?;
    controller.start(size.width, size.height);

    loop {
        let phase = controller.tick(
            &mut terminal,
            Local::now(),
            |location| fetch_weather(runtime, provider.as_ref(), location, config.fetch_timeout),
            || event::poll_command(config.tick),
        )?;
        if phase == Phase::Terminated {
            break;
        }
    }

    info!("Dashboard stopped");
    Ok(())
}
