//! # Loop Controller
//!
//! Owns all dashboard state and runs one tick at a time:
//!
//! ```text
//! pending `r`? ──► invalidate
//! maybe_refresh(minute) ──► spinner.advance() ──► draw ──► poll(timeout) ──► apply
//! ```
//!
//! The controller never talks to the network or the keyboard directly: the
//! caller hands each tick a `fetch` closure and a `poll` closure. That keeps
//! the ordering logic testable against a `TestBackend` with scripted input.

use std::fmt;
use std::io;

use chrono::{DateTime, Local, Timelike};
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::TemperatureUnit;
use crate::core::action::{Command, Effect, update};
use crate::core::layout::{self, LayoutGeometry};
use crate::core::refresh::Refresher;
use crate::core::spinner::Spinner;
use crate::core::state::{Location, Phase, UiState, WeatherSnapshot};
use crate::tui::ui::{RenderProps, draw_dashboard};
use crate::weather::{Observation, WeatherError};

#[derive(Debug)]
pub enum TickError {
    /// The very first weather fetch failed, so there is nothing to show.
    Fetch(WeatherError),
    /// Reading input failed.
    Io(io::Error),
    /// Drawing to the terminal failed.
    Render(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::Fetch(e) => write!(f, "could not fetch initial weather: {e}"),
            TickError::Io(e) => write!(f, "input error: {e}"),
            TickError::Render(e) => write!(f, "render error: {e}"),
        }
    }
}

impl std::error::Error for TickError {}

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub temp_unit: TemperatureUnit,
    pub refresh_interval: u32,
}

pub struct Controller {
    location: Location,
    diagnostic: String,
    temp_unit: TemperatureUnit,
    ui: UiState,
    geometry: LayoutGeometry,
    spinner: Spinner,
    refresher: Refresher,
    phase: Phase,
}

impl Controller {
    pub fn new(location: Location, options: DashboardOptions) -> Self {
        let diagnostic = location.diagnostic_json();
        Self {
            location,
            diagnostic,
            temp_unit: options.temp_unit,
            ui: UiState::default(),
            geometry: layout::compute(0, 0),
            spinner: Spinner::default(),
            refresher: Refresher::new(options.refresh_interval),
            phase: Phase::Starting,
        }
    }

    /// Lays out for the current terminal size and enters `Running`.
    pub fn start(&mut self, width: u16, height: u16) {
        if self.phase != Phase::Starting {
            return;
        }
        self.geometry = layout::compute(width, height);
        self.phase = Phase::Running;
        info!("Dashboard running at {}x{}", width, height);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.refresher.snapshot()
    }

    /// Runs one full tick and returns the phase afterwards.
    pub fn tick<B, F, P>(
        &mut self,
        terminal: &mut Terminal<B>,
        now: DateTime<Local>,
        fetch: F,
        poll: P,
    ) -> Result<Phase, TickError>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
        F: FnOnce(&Location) -> Result<Observation, WeatherError>,
        P: FnOnce() -> io::Result<Option<Command>>,
    {
        if self.phase != Phase::Running {
            return Ok(self.phase);
        }

        if self.ui.take_force_refresh() {
            info!("Manual refresh requested");
            self.refresher.invalidate();
        }

        let location = &self.location;
        let unit = self.temp_unit;
        let refreshed = self
            .refresher
            .maybe_refresh(now.minute(), || {
                fetch(location)
                    .map(|observation| WeatherSnapshot::from_observation(observation, unit, now))
            })
            .map(|_| ());
        if let Err(e) = refreshed {
            if self.refresher.snapshot().is_none() {
                return Err(TickError::Fetch(e));
            }
            info!("Keeping previous weather snapshot after: {e}");
        }

        let spinner = self.spinner.advance();

        let props = RenderProps {
            location: &self.location,
            snapshot: self.refresher.snapshot(),
            geometry: &self.geometry,
            spinner,
            verbose: self.ui.verbose,
            diagnostic: &self.diagnostic,
        };
        terminal
            .draw(|frame| draw_dashboard(frame, &props))
            .map_err(|e| TickError::Render(Box::new(e)))?;

        if let Some(command) = poll().map_err(TickError::Io)? {
            self.apply(command);
        }

        Ok(self.phase)
    }

    /// Applies a command to the UI state, geometry and phase.
    pub fn apply(&mut self, command: Command) {
        debug!("Applying {:?}", command);
        match update(&mut self.ui, command) {
            Effect::Quit => {
                info!("Quit requested");
                self.phase = Phase::Terminated;
            }
            Effect::Relayout { width, height } => {
                debug!("Relayout to {}x{}", width, height);
                self.geometry = layout::compute(width, height);
            }
            Effect::None => {}
        }
    }
}
