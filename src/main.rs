/*
 *  main.rs
 *
 *  AvHUD - aviation weather at a glance
 *	(c) 2025-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{bail, Context, Result};
use env_logger::Env;
use log::{error, info};
use tokio::signal::unix::{signal, SignalKind};

use avhud::avwx::AvwxSource;
use avhud::config::{self, Config, SinkKind, SourceKind};
use avhud::demo::DemoSource;
use avhud::display::drivers::terminal::TerminalSink;
use avhud::display::{DisplayController, DisplaySink};
use avhud::weather::WeatherSource;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
/// Once a signal is caught, it logs the event and returns.
async fn signal_handler() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Raise `stop` from a helper thread once a termination signal arrives.
/// The render loop stays on the main thread, which the emulator window needs.
fn spawn_signal_watcher(stop: Arc<AtomicBool>) -> Result<()> {
    thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Signal watcher runtime failed: {}", e);
                    return;
                }
            };
            match rt.block_on(signal_handler()) {
                Ok(()) => stop.store(true, Ordering::Relaxed),
                Err(e) => error!("Signal handlers could not be installed: {}", e),
            }
        })
        .context("spawning signal watcher")?;
    Ok(())
}

fn build_source(cfg: &Config) -> Result<Box<dyn WeatherSource>> {
    match cfg.source() {
        SourceKind::Demo => Ok(Box::new(DemoSource::new())),
        SourceKind::Avwx => {
            let source = AvwxSource::new(cfg.api_token.as_deref()).context("creating AVWX client")?;
            Ok(Box::new(source))
        }
    }
}

fn build_sink(cfg: &Config) -> Result<Box<dyn DisplaySink>> {
    let (width, height) = cfg.panel_size();
    match cfg.sink() {
        SinkKind::Terminal => Ok(Box::new(TerminalSink::stdout(width, height))),

        #[cfg(feature = "emulator")]
        SinkKind::Emulator => {
            use avhud::display::drivers::emulator::EmulatorSink;
            let sink = EmulatorSink::new(width, height, cfg.scale(), cfg.brightness())
                .context("opening emulator window")?;
            Ok(Box::new(sink))
        }
        #[cfg(not(feature = "emulator"))]
        SinkKind::Emulator => bail!("emulator sink requested but built without the `emulator` feature"),

        #[cfg(feature = "hardware")]
        SinkKind::Matrix => {
            use avhud::display::drivers::matrix::MatrixSink;
            let sink = MatrixSink::new(width, height, cfg.brightness())
                .context("initialising LED matrix")?;
            Ok(Box::new(sink))
        }
        #[cfg(not(feature = "hardware"))]
        SinkKind::Matrix => bail!("matrix sink requested but built without the `hardware` feature"),
    }
}

fn main() -> Result<()> {
    let (cfg, cli) = config::load()?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        println!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("AvHUD - aviation weather at a glance");
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);
    let (width, height) = cfg.panel_size();
    info!(
        "Station {} via {:?}, {:?} sink {}x{}",
        cfg.station(),
        cfg.source(),
        cfg.sink(),
        width,
        height
    );

    let source = build_source(&cfg)?;
    let sink = build_sink(&cfg)?;

    let mut controller = DisplayController::new(cfg.to_controller_config(), source, sink);
    spawn_signal_watcher(controller.stop_flag())?;

    controller.run().context("display loop")?;
    info!("Shutdown complete");
    Ok(())
}
