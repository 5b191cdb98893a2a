/*
 *  tests/controller_integration.rs
 *
 *  Integration tests for the display controller
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use avhud::demo::DemoSource;
use avhud::display::components::forecast::periods_shown;
use avhud::display::components::{render_loading, render_startup, STARTUP_TITLE};
use avhud::display::drivers::mock::MockSink;
use avhud::display::{ControllerConfig, ControllerState, DisplayController, DisplayMode, ScreenGeometry};
use avhud::weather::{
    FlightCategory, Forecast, ForecastPeriod, WeatherError, WeatherSnapshot, WeatherSource,
};

/// Source that replays a script of outcomes and counts the fetches.
struct Scripted {
    current_ok: Vec<bool>,
    periods: usize,
    fetches: Arc<AtomicUsize>,
}

impl Scripted {
    fn new(current_ok: Vec<bool>, periods: usize) -> (Self, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        (Self { current_ok, periods, fetches: Arc::clone(&fetches) }, fetches)
    }
}

impl WeatherSource for Scripted {
    fn fetch_current(&mut self, station: &str) -> Result<WeatherSnapshot, WeatherError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        let ok = self.current_ok.get(n).copied().unwrap_or(false);
        if !ok {
            return Err(WeatherError::Unavailable(format!("scripted failure {}", n)));
        }
        Ok(WeatherSnapshot {
            station: station.to_string(),
            temperature: Some(n as i32),
            wind_direction: Some(270),
            wind_speed: Some(10),
            category: FlightCategory::Ifr,
            conditions: vec!["RA".into()],
            ..Default::default()
        })
    }

    fn fetch_forecast(&mut self, station: &str) -> Result<Forecast, WeatherError> {
        if self.periods == 0 {
            return Err(WeatherError::MissingData("no TAF".into()));
        }
        let cats = [FlightCategory::Lifr, FlightCategory::Vfr, FlightCategory::Mvfr];
        Ok(Forecast {
            station: station.to_string(),
            periods: (0..self.periods)
                .map(|i| ForecastPeriod {
                    start_time: format!("{:02}00", (i * 3) % 24),
                    wind_direction: Some(180),
                    wind_speed: Some(8),
                    category: cats[i % cats.len()],
                    ceiling: Some(1200),
                })
                .collect(),
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn config() -> ControllerConfig {
    ControllerConfig {
        station: "KDEN".into(),
        startup_hold: Duration::ZERO,
        ..Default::default()
    }
}

#[test]
fn loading_screen_until_data_and_mode_still_alternates() {
    let (source, _) = Scripted::new(vec![], 0);
    let sink = MockSink::new(64, 32);
    let state = sink.state();
    let mut c = DisplayController::new(config(), Box::new(source), Box::new(sink));

    let t0 = Instant::now();
    for _ in 0..149 {
        c.tick_at(t0);
    }
    assert_eq!(c.state(), ControllerState::AwaitingFirstData);
    assert_eq!(c.mode(), DisplayMode::CurrentConditions);
    c.tick_at(t0);
    assert_eq!(c.mode(), DisplayMode::Forecast);

    let loading = render_loading(&ScreenGeometry::for_size(64, 32), "KDEN");
    let state = state.lock().unwrap();
    assert_eq!(state.frames.len(), 150);
    assert!(state.frames.iter().all(|f| *f == loading));
}

#[test]
fn mode_flips_every_five_seconds_at_thirty_fps() {
    let (source, fetches) = Scripted::new(vec![true; 8], 2);
    let cfg = ControllerConfig {
        refresh_interval: Duration::from_secs(20),
        alternate_ticks: 150,
        fps: 30,
        ..config()
    };
    let mut c = DisplayController::new(cfg, Box::new(source), Box::new(MockSink::new(64, 64)));

    let t0 = Instant::now();
    let frame = Duration::from_micros(1_000_000 / 30);
    let mut flips = Vec::new();
    let mut last = c.mode();
    // one minute of render time with refreshes landing mid-screen
    for i in 0..1_800u32 {
        c.tick_at(t0 + frame * i);
        if c.mode() != last {
            flips.push(i + 1);
            last = c.mode();
        }
    }
    assert_eq!(flips.len(), 12);
    assert!(flips.iter().enumerate().all(|(k, &tick)| tick == (k as u32 + 1) * 150));
    assert_eq!(fetches.load(Ordering::SeqCst), 3);
}

#[test]
fn refresh_waits_for_the_interval_even_after_failure() {
    let (source, fetches) = Scripted::new(vec![false, true], 0);
    let mut c = DisplayController::new(config(), Box::new(source), Box::new(MockSink::new(64, 32)));

    let t0 = Instant::now();
    c.tick_at(t0);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    c.tick_at(t0 + Duration::from_secs(1));
    c.tick_at(t0 + Duration::from_secs(299));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(c.snapshot().is_none());

    c.tick_at(t0 + Duration::from_secs(300));
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert!(c.snapshot().is_some());
    assert!(matches!(c.state(), ControllerState::Alternating(_)));
}

#[test]
fn failed_refresh_keeps_stale_data() {
    let (source, _) = Scripted::new(vec![true, false], 3);
    let mut c = DisplayController::new(config(), Box::new(source), Box::new(MockSink::new(64, 32)));

    let t0 = Instant::now();
    c.tick_at(t0);
    let first = c.snapshot().cloned();
    assert!(first.is_some());

    c.tick_at(t0 + Duration::from_secs(301));
    assert_eq!(c.snapshot().cloned(), first);
    assert_eq!(c.forecast().map(|f| f.periods.len()), Some(3));
}

#[test]
fn rendering_is_deterministic() {
    let run = || {
        let (source, _) = Scripted::new(vec![true], 3);
        let sink = MockSink::new(64, 64);
        let state = sink.state();
        let cfg = ControllerConfig { alternate_ticks: 20, ..config() };
        let mut c = DisplayController::new(cfg, Box::new(source), Box::new(sink));
        let t0 = Instant::now();
        for _ in 0..90 {
            c.tick_at(t0);
        }
        let frames = state.lock().unwrap().frames.clone();
        frames
    };
    let a = run();
    let b = run();
    assert_eq!(a.len(), 90);
    assert_eq!(a, b);
    // the icon animates, so not every current-conditions frame is the same
    assert!(a[..19].windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn forecast_screen_caps_periods_and_colors_header() {
    let (source, _) = Scripted::new(vec![true], 7);
    let sink = MockSink::new(64, 128);
    let cfg = ControllerConfig { alternate_ticks: 1, ..config() };
    let mut c = DisplayController::new(cfg, Box::new(source), Box::new(sink));

    c.tick_at(Instant::now());
    assert_eq!(c.mode(), DisplayMode::Forecast);

    let forecast = c.forecast().cloned().unwrap();
    assert_eq!(periods_shown(c.geometry(), &forecast), 5);

    let frame = c.render_frame();
    assert_eq!(frame.pixel(10, 0), Some(FlightCategory::Lifr.color()));
    assert_eq!(frame.height(), 128);
}

#[test]
fn current_screen_header_follows_category() {
    let (source, _) = Scripted::new(vec![true], 0);
    let mut c = DisplayController::new(config(), Box::new(source), Box::new(MockSink::new(64, 32)));
    c.tick_at(Instant::now());
    assert_eq!(c.mode(), DisplayMode::CurrentConditions);
    let frame = c.render_frame();
    assert_eq!(frame.pixel(63, 1), Some(FlightCategory::Ifr.color()));
}

#[test]
fn run_shows_splash_and_clears_on_stop() {
    let sink = MockSink::new(64, 32).stop_after(6);
    let state = sink.state();
    let mut c = DisplayController::new(config(), Box::new(DemoSource::pinned(0)), Box::new(sink));

    c.run().unwrap();

    let state = state.lock().unwrap();
    let splash = render_startup(&ScreenGeometry::for_size(64, 32), STARTUP_TITLE);
    assert_eq!(state.frames.first(), Some(&splash));
    assert_eq!(state.clear_count, 1);
    assert_eq!(state.frames.last().map(|f| f.lit_count()), Some(0));
    // splash, at least one tick, final clear
    assert!(state.frames.len() >= 3);
    assert!(state.pace_calls >= 1);
}

#[test]
fn external_stop_flag_ends_run() {
    let sink = MockSink::new(64, 32);
    let state = sink.state();
    let mut c = DisplayController::new(config(), Box::new(DemoSource::pinned(1)), Box::new(sink));
    c.stop_flag().store(true, Ordering::Relaxed);

    c.run().unwrap();

    let state = state.lock().unwrap();
    // splash then the clear, no ticks
    assert_eq!(state.frames.len(), 2);
    assert_eq!(state.clear_count, 1);
}

#[test]
fn present_failures_do_not_stop_ticking() {
    let (source, _) = Scripted::new(vec![true], 0);
    let sink = MockSink::new(64, 32);
    let state = sink.state();
    state.lock().unwrap().simulate_present_failure = true;
    let mut c = DisplayController::new(config(), Box::new(source), Box::new(sink));

    let t0 = Instant::now();
    for _ in 0..3 {
        c.tick_at(t0);
    }
    assert_eq!(c.phase().value(), 3);
    assert!(state.lock().unwrap().frames.is_empty());
}
