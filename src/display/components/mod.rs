/*
 *  display/components/mod.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Full screen layouts, one per display mode
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

pub mod startup;
pub mod current;
pub mod forecast;

// Re-exports
pub use startup::{render_loading, render_startup, STARTUP_TITLE};
pub use current::render_current;
pub use forecast::render_forecast;

use embedded_graphics::pixelcolor::Rgb888;

use crate::display::layout::ScreenGeometry;
use crate::draw::fill_rect;
use crate::vframebuf::PixelBuffer;

/// Full width category bar across the top of the panel
pub(crate) fn draw_header_bar(buf: &mut PixelBuffer, geom: &ScreenGeometry, color: Rgb888) {
    fill_rect(buf, 0, 0, geom.width, geom.bar_height, color);
}
