/*
 *  display/components/current.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Current conditions screen
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

use embedded_graphics::pixelcolor::Rgb888;

use crate::display::components::draw_header_bar;
use crate::display::layout::{icon_colors, palette, ScreenGeometry};
use crate::draw::{draw_text, plot_offsets, right_align_x, stamp, truncate_to_width};
use crate::vframebuf::PixelBuffer;
use crate::weather::{get_weather_icon, WeatherSnapshot};
use crate::weather_glyph::{icon, icon_backdrop, ICON_WIDTH};
use crate::wind::{arrow, ARROW_RADIUS};

const MARGIN: i32 = 1;
const STATION_CHARS: usize = 4;
const MAX_CONDITIONS: usize = 2;

/// Visibility at or beyond this is shown as "10SM".
pub const VISIBILITY_CAP_SM: f64 = 10.0;

fn visibility_text(sm: f64) -> String {
    if sm >= VISIBILITY_CAP_SM {
        "VIS 10SM".to_string()
    } else if sm.fract() == 0.0 {
        format!("VIS {:.0}SM", sm)
    } else {
        format!("VIS {:.1}SM", sm)
    }
}

fn ceiling_text(ceiling_ft: Option<u32>) -> String {
    match ceiling_ft {
        Some(ft) => format!("CIG {:03}", ft / 100),
        None => "CIG CLR".to_string(),
    }
}

/// Detail lines below the hero group, in display order, skipping absent data.
fn detail_bands(snap: &WeatherSnapshot) -> Vec<(String, Rgb888)> {
    let mut bands = Vec::with_capacity(4);
    if let Some(dp) = snap.dewpoint {
        bands.push((format!("DP {}°", dp), palette::DEWPOINT));
    }
    if let Some(vis) = snap.visibility {
        bands.push((visibility_text(vis), palette::VISIBILITY));
    }
    bands.push((ceiling_text(snap.ceiling), palette::CEILING));
    if !snap.conditions.is_empty() {
        let wx: Vec<&str> = snap
            .conditions
            .iter()
            .take(MAX_CONDITIONS)
            .map(String::as_str)
            .collect();
        bands.push((wx.join(" "), palette::CONDITIONS));
    }
    bands
}

/// Current conditions for one snapshot at one animation phase.
pub fn render_current(geom: &ScreenGeometry, snap: &WeatherSnapshot, phase: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(geom.width, geom.height);
    let category_color = snap.category.color();
    let w = geom.width as i32;

    // header
    draw_header_bar(&mut buf, geom, category_color);
    let station: String = snap.station.chars().take(STATION_CHARS).collect();
    draw_text(&mut buf, &station, MARGIN, geom.header_text_y, palette::TEXT);
    if let Some(t) = snap.temperature {
        let temp = format!("{}°", t);
        draw_text(&mut buf, &temp, right_align_x(&temp, w - MARGIN), geom.header_text_y, palette::TEMPERATURE);
    }

    // hero: icon, category badge, wind
    let kind = get_weather_icon(&snap.conditions, snap.category);
    let (icon_color, backdrop_color) = icon_colors(kind);
    let icon_x = MARGIN + 1;
    let icon_y = geom.hero_y + 1;
    if let (Some(cloud), Some(color)) = (icon_backdrop(kind), backdrop_color) {
        stamp(&mut buf, &cloud, icon_x, icon_y, color);
    }
    stamp(&mut buf, &icon(kind, phase), icon_x, icon_y, icon_color);

    let text_x = icon_x + ICON_WIDTH as i32 + 2;
    draw_text(&mut buf, snap.category.abbreviation(), text_x, geom.hero_y + 1, category_color);

    if let Some(speed) = snap.wind_speed {
        draw_text(&mut buf, &format!("{}KT", speed), text_x, geom.hero_y + 10, palette::WIND_TEXT);
        if let Some(dir) = snap.wind_direction {
            let cx = w - MARGIN - ARROW_RADIUS - 1;
            let cy = geom.hero_y + geom.hero_height as i32 / 2 - 1;
            plot_offsets(&mut buf, &arrow(dir as i32), cx, cy, palette::WIND_ARROW);
        }
    }

    // detail bands, dropped once the panel runs out of rows
    let mut y = geom.band_y;
    for (text, color) in detail_bands(snap) {
        if !geom.line_fits(y) {
            break;
        }
        draw_text(&mut buf, truncate_to_width(&text, geom.width - MARGIN as u32), MARGIN, y, color);
        y += geom.band_pitch as i32;
    }

    buf
}
