/*
 *  display/components/forecast.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  TAF screen, one block per forecast period
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
use crate::display::layout::{palette, utc_to_local_hhmm, ScreenGeometry};
use crate::draw::{center_x, draw_text, fill_rect, right_align_x, text_width};
use crate::glyphs::GLYPH_HEIGHT;
use crate::vframebuf::PixelBuffer;
use crate::weather::{Forecast, ForecastPeriod, MAX_FORECAST_PERIODS};

const STRIP_WIDTH: u32 = 2;
const TEXT_X: i32 = 4;
const LABEL: &str = "TAF";

fn wind_text(p: &ForecastPeriod) -> Option<String> {
    match (p.wind_direction, p.wind_speed) {
        (Some(dir), Some(spd)) => Some(format!("{:03}/{}KT", dir, spd)),
        (None, Some(spd)) => Some(format!("{}KT", spd)),
        _ => None,
    }
}

fn draw_period(buf: &mut PixelBuffer, geom: &ScreenGeometry, p: &ForecastPeriod, y: i32) {
    let w = geom.width as i32;
    fill_rect(buf, 0, y, STRIP_WIDTH, geom.forecast_block - 1, p.category.color());

    let row1 = y + 1;
    let time = utc_to_local_hhmm(&p.start_time);
    draw_text(buf, &time, TEXT_X, row1, palette::FORECAST_TIME);
    if let Some(ft) = p.ceiling {
        let cig = format!("C{:03}", ft / 100);
        // only when it clears the time column
        let x = right_align_x(&cig, w - 1);
        if x > TEXT_X + text_width(&time) as i32 {
            draw_text(buf, &cig, x, row1, palette::CEILING);
        }
    }

    if let Some(wind) = wind_text(p) {
        draw_text(buf, &wind, TEXT_X, row1 + GLYPH_HEIGHT as i32 + 1, palette::WIND_TEXT);
    }
}

/// Forecast screen. `header` colors the top bar, normally the category of
/// the first period.
///
/// Periods are drawn in order in fixed-height blocks until the panel runs
/// out of rows or `MAX_FORECAST_PERIODS` have been drawn.
pub fn render_forecast(geom: &ScreenGeometry, forecast: &Forecast, _phase: u32, header: Rgb888) -> PixelBuffer {
    let mut buf = PixelBuffer::new(geom.width, geom.height);

    draw_header_bar(&mut buf, geom, header);
    draw_text(&mut buf, LABEL, 1, geom.header_text_y, palette::TEXT);
    let station: String = forecast.station.chars().take(4).collect();
    draw_text(&mut buf, &station, 1 + text_width(LABEL) as i32 + 5, geom.header_text_y, palette::TEXT);

    if forecast.periods.is_empty() {
        let msg = "NO TAF";
        let y = geom.height as i32 / 2 - GLYPH_HEIGHT as i32 / 2;
        draw_text(&mut buf, msg, center_x(msg, geom.width), y, palette::TEXT);
        return buf;
    }

    let mut y = geom.forecast_y;
    for p in forecast.periods.iter().take(MAX_FORECAST_PERIODS) {
        if !geom.block_fits(y) {
            break;
        }
        draw_period(&mut buf, geom, p, y);
        y += geom.forecast_block as i32;
    }
    buf
}

/// How many periods `render_forecast` will draw for this panel.
pub fn periods_shown(geom: &ScreenGeometry, forecast: &Forecast) -> usize {
    let fit = (0..MAX_FORECAST_PERIODS)
        .take_while(|&i| geom.block_fits(geom.forecast_y + (i as u32 * geom.forecast_block) as i32))
        .count();
    fit.min(forecast.periods.len())
}
