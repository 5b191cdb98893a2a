/*
 *  display/mode_controller.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Display controller - owns the weather data, the refresh and screen
 *  alternation timers and the animation phase, and drives the sink
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use super::components::{render_current, render_forecast, render_loading, render_startup, STARTUP_TITLE};
use super::error::DisplayError;
use super::layout::ScreenGeometry;
use super::traits::DisplaySink;
use super::{AnimationPhase, DisplayMode};
use crate::vframebuf::PixelBuffer;
use crate::weather::{Forecast, WeatherSnapshot, WeatherSource};

/// Flat set of named values the controller is built from
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Station identifier handed to the weather source
    pub station: String,

    /// Wall-clock time between weather refreshes
    pub refresh_interval: Duration,

    /// Render ticks each screen stays up before flipping
    pub alternate_ticks: u32,

    /// Render tick rate
    pub fps: u32,

    /// How long the splash stays up before the first refresh
    pub startup_hold: Duration,

    /// Splash title
    pub title: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            station: String::new(),
            refresh_interval: Duration::from_secs(300),
            alternate_ticks: 150,
            fps: 30,
            startup_hold: Duration::from_millis(2000),
            title: STARTUP_TITLE.to_string(),
        }
    }
}

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Startup,
    AwaitingFirstData,
    Alternating(DisplayMode),
}

pub struct DisplayController {
    config: ControllerConfig,
    geometry: ScreenGeometry,
    source: Box<dyn WeatherSource>,
    sink: Box<dyn DisplaySink>,

    snapshot: Option<WeatherSnapshot>,
    forecast: Option<Forecast>,

    state: ControllerState,
    mode: DisplayMode,
    mode_ticks: u32,
    phase: AnimationPhase,
    last_refresh: Option<Instant>,

    stop: Arc<AtomicBool>,
}

impl DisplayController {
    pub fn new(config: ControllerConfig, source: Box<dyn WeatherSource>, sink: Box<dyn DisplaySink>) -> Self {
        let (width, height) = sink.dimensions();
        Self {
            config,
            geometry: ScreenGeometry::for_size(width, height),
            source,
            sink,
            snapshot: None,
            forecast: None,
            state: ControllerState::Startup,
            mode: DisplayMode::CurrentConditions,
            mode_ticks: 0,
            phase: AnimationPhase::default(),
            last_refresh: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an externally owned stop flag, e.g. one set by a signal handler.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.config.refresh_interval,
        }
    }

    /// Pull current conditions and forecast. Each is replaced only on
    /// success; the refresh timer restarts either way.
    pub fn refresh(&mut self, now: Instant) {
        let station = self.config.station.clone();
        info!("Refreshing weather for {} from {}", station, self.source.name());
        self.last_refresh = Some(now);

        match self.source.fetch_current(&station) {
            Ok(snap) => {
                info!(
                    "{} {} temp {:?}C wind {:?}@{:?}KT alt {:?} clouds {}",
                    snap.station,
                    snap.category,
                    snap.temperature,
                    snap.wind_direction,
                    snap.wind_speed,
                    snap.altimeter,
                    snap.clouds
                        .iter()
                        .map(|c| format!("{}{:03}", c.kind, c.altitude.unwrap_or(0)))
                        .collect::<Vec<_>>()
                        .join(" "),
                );
                self.snapshot = Some(snap);
            }
            Err(e) => warn!("Current conditions unavailable, keeping previous: {}", e),
        }

        match self.source.fetch_forecast(&station) {
            Ok(forecast) => {
                debug!("{} forecast periods for {}", forecast.periods.len(), forecast.station);
                self.forecast = Some(forecast);
            }
            Err(e) => warn!("Forecast unavailable, keeping previous: {}", e),
        }

        if self.snapshot.is_some() {
            self.state = ControllerState::Alternating(self.mode);
        }
    }

    fn advance_mode_timer(&mut self) {
        self.mode_ticks += 1;
        if self.mode_ticks >= self.config.alternate_ticks.max(1) {
            self.mode_ticks = 0;
            self.mode = self.mode.toggled();
            debug!("Display mode -> {:?}", self.mode);
        }
    }

    /// Compose the frame for the current state without side effects.
    pub fn render_frame(&self) -> PixelBuffer {
        let phase = self.phase.value();
        match (&self.snapshot, self.mode) {
            (None, _) => render_loading(&self.geometry, &self.config.station),
            (Some(snap), DisplayMode::CurrentConditions) => render_current(&self.geometry, snap, phase),
            (Some(snap), DisplayMode::Forecast) => {
                let empty;
                let forecast = match &self.forecast {
                    Some(f) => f,
                    None => {
                        empty = Forecast { station: snap.station.clone(), periods: Vec::new() };
                        &empty
                    }
                };
                let header = if forecast.periods.is_empty() {
                    snap.category.color()
                } else {
                    forecast.leading_category().color()
                };
                render_forecast(&self.geometry, forecast, phase, header)
            }
        }
    }

    /// One render tick at wall-clock `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if self.refresh_due(now) {
            self.refresh(now);
        }

        self.advance_mode_timer();
        self.state = match self.snapshot {
            None => ControllerState::AwaitingFirstData,
            Some(_) => ControllerState::Alternating(self.mode),
        };

        let frame = self.render_frame();
        if let Err(e) = self.sink.present(&frame) {
            error!("Present failed: {}", e);
        }
        self.phase.advance();
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn stop_requested(&mut self) -> bool {
        self.sink.poll_stop() || self.stop.load(Ordering::Relaxed)
    }

    // sleep in short slices so a stop request is not held up by the splash
    fn hold(&mut self, total: Duration) {
        let until = Instant::now() + total;
        while Instant::now() < until && !self.stop_requested() {
            thread::sleep(Duration::from_millis(20).min(until.saturating_duration_since(Instant::now())));
        }
    }

    /// Run until the sink or the stop flag asks to quit, then blank the panel.
    pub fn run(&mut self) -> Result<(), DisplayError> {
        self.state = ControllerState::Startup;
        let splash = render_startup(&self.geometry, &self.config.title);
        if let Err(e) = self.sink.present(&splash) {
            error!("Present failed: {}", e);
        }
        self.hold(self.config.startup_hold);

        if !self.stop_requested() {
            self.refresh(Instant::now());
            if self.snapshot.is_none() {
                self.state = ControllerState::AwaitingFirstData;
            }
        }

        let frame_time = Duration::from_micros(1_000_000 / self.config.fps.max(1) as u64);
        while !self.stop_requested() {
            self.tick();
            if !self.sink.pace(self.config.fps) {
                thread::sleep(frame_time);
            }
        }

        info!("Stopping, clearing display");
        self.sink.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockSink;
    use crate::weather::{FlightCategory, WeatherError};

    struct Scripted {
        calls: usize,
        fail: bool,
    }

    impl WeatherSource for Scripted {
        fn fetch_current(&mut self, station: &str) -> Result<WeatherSnapshot, WeatherError> {
            self.calls += 1;
            if self.fail {
                return Err(WeatherError::Unavailable("scripted".into()));
            }
            Ok(WeatherSnapshot {
                station: station.into(),
                temperature: Some(self.calls as i32),
                category: FlightCategory::Vfr,
                ..Default::default()
            })
        }

        fn fetch_forecast(&mut self, _station: &str) -> Result<Forecast, WeatherError> {
            Err(WeatherError::Unavailable("scripted".into()))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn controller(fail: bool, alternate_ticks: u32) -> DisplayController {
        let config = ControllerConfig {
            station: "KDEN".into(),
            alternate_ticks,
            ..Default::default()
        };
        DisplayController::new(
            config,
            Box::new(Scripted { calls: 0, fail }),
            Box::new(MockSink::new(64, 32)),
        )
    }

    #[test]
    fn mode_flips_on_threshold() {
        let mut c = controller(false, 3);
        let t0 = Instant::now();
        c.tick_at(t0);
        c.tick_at(t0);
        assert_eq!(c.mode(), DisplayMode::CurrentConditions);
        c.tick_at(t0);
        assert_eq!(c.mode(), DisplayMode::Forecast);
        assert_eq!(c.state(), ControllerState::Alternating(DisplayMode::Forecast));
        c.tick_at(t0);
        c.tick_at(t0);
        c.tick_at(t0);
        assert_eq!(c.mode(), DisplayMode::CurrentConditions);
    }

    #[test]
    fn failed_refresh_keeps_waiting_state() {
        let mut c = controller(true, 150);
        c.tick_at(Instant::now());
        assert_eq!(c.state(), ControllerState::AwaitingFirstData);
        assert!(c.snapshot().is_none());
    }

    #[test]
    fn phase_wraps_at_sixty() {
        let mut c = controller(false, 1000);
        let t0 = Instant::now();
        for _ in 0..61 {
            c.tick_at(t0);
        }
        assert_eq!(c.phase().value(), 1);
    }

    #[test]
    fn missing_forecast_shows_no_taf_in_snapshot_color() {
        let mut c = controller(false, 1);
        c.tick_at(Instant::now());
        assert_eq!(c.mode(), DisplayMode::Forecast);
        let frame = c.render_frame();
        assert_eq!(frame.pixel(0, 0), Some(FlightCategory::Vfr.color()));
    }
}
