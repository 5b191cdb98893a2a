/*
 *  display/mod.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Display subsystem - screens, controller and sinks
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

// Core trait definitions
pub mod traits;
pub mod error;

// Geometry and palette for the screens
pub mod layout;

// Full screen layouts
pub mod components;

// Display controller
pub mod mode_controller;

// Sinks (emulator and matrix are feature gated inside)
pub mod drivers;

// Re-exports for convenience
pub use traits::DisplaySink;
pub use error::DisplayError;
pub use layout::{utc_to_local_hhmm, ScreenGeometry};
pub use mode_controller::{ControllerConfig, ControllerState, DisplayController};

/// Animation phase wraps at this many ticks
pub const PHASE_PERIOD: u32 = 60;

/// Which weather screen is up
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayMode {
    CurrentConditions, // METAR screen
    Forecast,          // TAF screen
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::CurrentConditions => DisplayMode::Forecast,
            DisplayMode::Forecast => DisplayMode::CurrentConditions,
        }
    }
}

/// Render tick counter in `0..PHASE_PERIOD`, drives the icon animations.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct AnimationPhase(u32);

impl AnimationPhase {
    pub fn new(value: u32) -> Self {
        Self(value % PHASE_PERIOD)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = (self.0 + 1) % PHASE_PERIOD;
    }
}
