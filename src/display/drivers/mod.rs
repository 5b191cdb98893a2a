/*
 *  display/drivers/mod.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Display sink implementations
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

// In-memory sink, used by unit and integration tests
pub mod mock;

// Truecolor terminal preview, always available
pub mod terminal;

// Desktop window emulation
#[cfg(feature = "emulator")]
pub mod emulator;

// HUB75 LED panel on a Raspberry Pi
#[cfg(feature = "hardware")]
pub mod matrix;
