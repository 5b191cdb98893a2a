/*
 *  display/components/startup.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Splash and waiting-for-data screen
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

use crate::display::layout::{palette, ScreenGeometry};
use crate::draw::{center_x, draw_text, stamp, text_width, truncate_to_width};
use crate::glyphs::GLYPH_HEIGHT;
use crate::vframebuf::PixelBuffer;
use crate::weather_glyph::{airplane, ICON_HEIGHT, ICON_WIDTH};

pub const STARTUP_TITLE: &str = "AVWX HUD";

const ICON_GAP: u32 = 2;
const LINE_PITCH: u32 = GLYPH_HEIGHT + 2;

/// Splash screen: airplane over a title, both centered.
pub fn render_startup(geom: &ScreenGeometry, title: &str) -> PixelBuffer {
    render_lines(geom, &[title])
}

/// Shown while no current conditions have arrived yet.
///
/// "LOADING <station>" on one line when it fits the width, otherwise split
/// over two lines when the height allows, otherwise truncated.
pub fn render_loading(geom: &ScreenGeometry, station: &str) -> PixelBuffer {
    let message = format!("LOADING {}", station);
    if text_width(&message) <= geom.width || station.is_empty() {
        return render_lines(geom, &[&message]);
    }
    let two_line = ICON_HEIGHT + ICON_GAP + LINE_PITCH + GLYPH_HEIGHT;
    if two_line <= geom.height {
        render_lines(geom, &["LOADING", station])
    } else {
        render_lines(geom, &[&message])
    }
}

fn render_lines(geom: &ScreenGeometry, lines: &[&str]) -> PixelBuffer {
    let mut buf = PixelBuffer::new(geom.width, geom.height);

    let text_block = match lines.len() as u32 {
        0 => 0,
        n => (n - 1) * LINE_PITCH + GLYPH_HEIGHT,
    };
    let block = ICON_HEIGHT + ICON_GAP + text_block;
    let top = (geom.height as i32 - block as i32).max(0) / 2;

    let plane_x = (geom.width as i32 - ICON_WIDTH as i32) / 2;
    stamp(&mut buf, &airplane(), plane_x, top, palette::AIRPLANE);

    let mut y = top + (ICON_HEIGHT + ICON_GAP) as i32;
    for line in lines {
        let text = truncate_to_width(line, geom.width);
        draw_text(&mut buf, text, center_x(text, geom.width), y, palette::TEXT);
        y += LINE_PITCH as i32;
    }
    buf
}
