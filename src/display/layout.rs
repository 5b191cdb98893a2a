/*
 *  display/layout.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Resolution dependent screen geometry and shared palette
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

use chrono::{NaiveTime, TimeDelta};
use embedded_graphics::pixelcolor::Rgb888;

use crate::glyphs::GLYPH_HEIGHT;
use crate::weather_glyph::IconKind;

/// Forecast times are shown at this fixed offset from UTC.
pub const LOCAL_OFFSET_HOURS: i64 = -6;

/// Palette shared by the screens. Flight category colors live on
/// `FlightCategory` itself.
pub mod palette {
    use embedded_graphics::pixelcolor::Rgb888;

    pub const TEXT: Rgb888 = Rgb888::new(255, 255, 255);
    pub const AIRPLANE: Rgb888 = Rgb888::new(0, 200, 255);
    pub const TEMPERATURE: Rgb888 = Rgb888::new(255, 200, 0);
    pub const WIND_TEXT: Rgb888 = Rgb888::new(0, 255, 200);
    pub const WIND_ARROW: Rgb888 = Rgb888::new(255, 100, 0);
    pub const DEWPOINT: Rgb888 = Rgb888::new(150, 200, 255);
    pub const VISIBILITY: Rgb888 = Rgb888::new(100, 200, 255);
    pub const CEILING: Rgb888 = Rgb888::new(200, 200, 200);
    pub const CONDITIONS: Rgb888 = Rgb888::new(255, 255, 100);
    pub const FORECAST_TIME: Rgb888 = Rgb888::new(255, 255, 255);
}

/// Icon color and, for precipitation, the color of the cloud behind it.
pub fn icon_colors(kind: IconKind) -> (Rgb888, Option<Rgb888>) {
    match kind {
        IconKind::Clear => (Rgb888::new(255, 200, 0), None),
        IconKind::Cloudy => (Rgb888::new(180, 180, 180), None),
        IconKind::Rain => (Rgb888::new(100, 100, 255), Some(Rgb888::new(150, 150, 150))),
        IconKind::Snow => (Rgb888::new(200, 220, 255), Some(Rgb888::new(200, 200, 200))),
        IconKind::Thunderstorm => (Rgb888::new(255, 255, 0), Some(Rgb888::new(100, 100, 100))),
        IconKind::Fog => (Rgb888::new(150, 150, 150), None),
    }
}

/// Pixel geometry for one panel size.
///
/// The header band is fixed. Everything below it is placed relative to the
/// panel height so the same screens work on 64x32 and 64x64 panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,

    /// Flight category bar at the very top
    pub bar_height: u32,
    /// Baseline-free y of header text (station, temperature, TAF label)
    pub header_text_y: i32,
    /// First row below the header band
    pub header_height: u32,

    /// Icon, badge and wind group
    pub hero_y: i32,
    pub hero_height: u32,

    /// First detail band and the pitch between bands
    pub band_y: i32,
    pub band_pitch: u32,

    /// Forecast blocks
    pub forecast_y: i32,
    pub forecast_block: u32,
}

impl ScreenGeometry {
    pub fn for_size(width: u32, height: u32) -> Self {
        let bar_height = 2;
        let header_height = 11;
        // one spare row per 32 of height between groups
        let gap = (height / 32) as i32;
        let hero_y = header_height as i32 + gap;
        let hero_height = 17;
        Self {
            width,
            height,
            bar_height,
            header_text_y: bar_height as i32 + 1,
            header_height,
            hero_y,
            hero_height,
            band_y: hero_y + hero_height as i32 + gap,
            band_pitch: GLYPH_HEIGHT + 1,
            forecast_y: header_height as i32 + 1,
            forecast_block: 16,
        }
    }

    /// True when a text line starting at `y` fits entirely on the panel.
    pub fn line_fits(&self, y: i32) -> bool {
        y >= 0 && y + GLYPH_HEIGHT as i32 <= self.height as i32
    }

    /// True when a forecast block starting at `y` fits entirely on the panel.
    pub fn block_fits(&self, y: i32) -> bool {
        y >= 0 && y + self.forecast_block as i32 <= self.height as i32
    }
}

/// UTC "HHMM" to local "HH:MM" at `LOCAL_OFFSET_HOURS`, wrapping past midnight.
///
/// Anything that is not exactly four digits naming a valid time gives an
/// empty string, so a bad period never takes the whole screen down.
pub fn utc_to_local_hhmm(utc: &str) -> String {
    if utc.len() != 4 || !utc.bytes().all(|b| b.is_ascii_digit()) {
        return String::new();
    }
    match NaiveTime::parse_from_str(utc, "%H%M") {
        Ok(t) => {
            let (local, _days) = t.overflowing_add_signed(TimeDelta::hours(LOCAL_OFFSET_HOURS));
            local.format("%H:%M").to_string()
        }
        Err(_) => String::new(),
    }
}
