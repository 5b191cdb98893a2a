/*
 *  weather.rs
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

use std::fmt;

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::weather_glyph::IconKind;

/// Forecast periods beyond this are never shown.
pub const MAX_FORECAST_PERIODS: usize = 5;

/// Coarse ceiling/visibility classification, each bound to one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    #[default]
    Unknown,
}

impl FlightCategory {
    pub const ALL: [FlightCategory; 5] = [
        FlightCategory::Vfr,
        FlightCategory::Mvfr,
        FlightCategory::Ifr,
        FlightCategory::Lifr,
        FlightCategory::Unknown,
    ];

    /// Case-insensitive parse of a flight-rules string.
    /// Anything unrecognised, including empty, is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "VFR" => FlightCategory::Vfr,
            "MVFR" => FlightCategory::Mvfr,
            "IFR" => FlightCategory::Ifr,
            "LIFR" => FlightCategory::Lifr,
            _ => FlightCategory::Unknown,
        }
    }

    pub const fn color(self) -> Rgb888 {
        match self {
            FlightCategory::Vfr => Rgb888::new(0, 255, 0),
            FlightCategory::Mvfr => Rgb888::new(0, 0, 255),
            FlightCategory::Ifr => Rgb888::new(255, 0, 0),
            FlightCategory::Lifr => Rgb888::new(255, 0, 255),
            FlightCategory::Unknown => Rgb888::new(128, 128, 128),
        }
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Unknown => "UNK",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloudLayer {
    /// FEW, SCT, BKN, OVC, ...
    pub kind: String,
    /// Hundreds of feet AGL
    pub altitude: Option<u32>,
}

impl CloudLayer {
    pub fn new(kind: &str, altitude: u32) -> Self {
        Self { kind: kind.to_string(), altitude: Some(altitude) }
    }

    pub fn is_ceiling(&self) -> bool {
        matches!(self.kind.as_str(), "BKN" | "OVC")
    }
}

/// Feet AGL of the lowest broken or overcast layer.
pub fn ceiling_from_layers(layers: &[CloudLayer]) -> Option<u32> {
    layers
        .iter()
        .filter(|l| l.is_ceiling())
        .find_map(|l| l.altitude)
        .map(|hundreds| hundreds * 100)
}

/// One current-conditions report. Absent fields were not reported.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherSnapshot {
    pub station: String,
    /// Celsius
    pub temperature: Option<i32>,
    pub dewpoint: Option<i32>,
    /// Degrees true the wind blows from, 0..=359
    pub wind_direction: Option<u16>,
    /// Knots
    pub wind_speed: Option<u32>,
    /// Statute miles
    pub visibility: Option<f64>,
    /// Feet AGL
    pub ceiling: Option<u32>,
    /// Inches of mercury
    pub altimeter: Option<f64>,
    pub category: FlightCategory,
    pub conditions: Vec<String>,
    pub clouds: Vec<CloudLayer>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastPeriod {
    /// UTC start as HHMM
    pub start_time: String,
    pub wind_direction: Option<u16>,
    pub wind_speed: Option<u32>,
    pub category: FlightCategory,
    /// Feet AGL
    pub ceiling: Option<u32>,
}

/// Periods in chronological order as delivered by the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    pub station: String,
    pub periods: Vec<ForecastPeriod>,
}

impl Forecast {
    /// The periods that can be shown, at most `MAX_FORECAST_PERIODS`.
    pub fn visible_periods(&self) -> &[ForecastPeriod] {
        &self.periods[..self.periods.len().min(MAX_FORECAST_PERIODS)]
    }

    /// Category of the first period, used for the forecast header bar.
    pub fn leading_category(&self) -> FlightCategory {
        self.periods.first().map(|p| p.category).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("unauthorized, an AVWX API token is required")]
    Unauthorized,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing weather data: {0}")]
    MissingData(String),

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("weather source unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a station identifier into current conditions and a forecast.
///
/// Calls block the caller; any timeout is the implementation's business.
pub trait WeatherSource: Send {
    fn fetch_current(&mut self, station: &str) -> Result<WeatherSnapshot, WeatherError>;
    fn fetch_forecast(&mut self, station: &str) -> Result<Forecast, WeatherError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Pick the icon for a set of condition codes.
///
/// Precedence runs across all codes: thunderstorm, snow, rain, fog. With none
/// of those present VFR shows clear and everything else cloudy.
pub fn get_weather_icon(conditions: &[String], category: FlightCategory) -> IconKind {
    let any = |needles: &[&str]| {
        conditions
            .iter()
            .any(|c| needles.iter().any(|n| c.to_ascii_uppercase().contains(n)))
    };

    if any(&["TS"]) {
        IconKind::Thunderstorm
    } else if any(&["SN", "SG"]) {
        IconKind::Snow
    } else if any(&["RA", "DZ"]) {
        IconKind::Rain
    } else if any(&["FG", "BR"]) {
        IconKind::Fog
    } else if category == FlightCategory::Vfr {
        IconKind::Clear
    } else {
        IconKind::Cloudy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(c: &[&str]) -> Vec<String> {
        c.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(FlightCategory::parse("VFR"), FlightCategory::Vfr);
        assert_eq!(FlightCategory::parse(" mvfr "), FlightCategory::Mvfr);
        assert_eq!(FlightCategory::parse("LIFR"), FlightCategory::Lifr);
        assert_eq!(FlightCategory::parse(""), FlightCategory::Unknown);
        assert_eq!(FlightCategory::parse("SVFR"), FlightCategory::Unknown);
    }

    #[test]
    fn category_colors() {
        assert_eq!(FlightCategory::Vfr.color(), Rgb888::new(0, 255, 0));
        assert_eq!(FlightCategory::Mvfr.color(), Rgb888::new(0, 0, 255));
        assert_eq!(FlightCategory::Ifr.color(), Rgb888::new(255, 0, 0));
        assert_eq!(FlightCategory::Lifr.color(), Rgb888::new(255, 0, 255));
        assert_eq!(FlightCategory::parse("garbage").color(), Rgb888::new(128, 128, 128));
    }

    #[test]
    fn icon_classification() {
        assert_eq!(get_weather_icon(&codes(&["TSRA"]), FlightCategory::Ifr), IconKind::Thunderstorm);
        assert_eq!(get_weather_icon(&codes(&["BR"]), FlightCategory::Mvfr), IconKind::Fog);
        assert_eq!(get_weather_icon(&[], FlightCategory::Vfr), IconKind::Clear);
        assert_eq!(get_weather_icon(&[], FlightCategory::Ifr), IconKind::Cloudy);
        assert_eq!(get_weather_icon(&codes(&["-SN"]), FlightCategory::Vfr), IconKind::Snow);
        assert_eq!(get_weather_icon(&codes(&["-DZ"]), FlightCategory::Vfr), IconKind::Rain);
        assert_eq!(get_weather_icon(&codes(&["HZ"]), FlightCategory::Vfr), IconKind::Clear);
        assert_eq!(get_weather_icon(&codes(&["HZ"]), FlightCategory::Unknown), IconKind::Cloudy);
    }

    #[test]
    fn thunder_wins_regardless_of_order() {
        assert_eq!(
            get_weather_icon(&codes(&["BR", "-RA", "VCTS"]), FlightCategory::Ifr),
            IconKind::Thunderstorm
        );
        assert_eq!(get_weather_icon(&codes(&["FG", "RA"]), FlightCategory::Lifr), IconKind::Rain);
    }

    #[test]
    fn ceiling_is_first_broken_or_overcast() {
        let layers = vec![
            CloudLayer::new("FEW", 15),
            CloudLayer::new("BKN", 25),
            CloudLayer::new("OVC", 40),
        ];
        assert_eq!(ceiling_from_layers(&layers), Some(2500));
        assert_eq!(ceiling_from_layers(&[CloudLayer::new("SCT", 80)]), None);
        assert_eq!(ceiling_from_layers(&[]), None);
    }

    #[test]
    fn forecast_caps_visible_periods() {
        let f = Forecast {
            station: "KDEN".into(),
            periods: vec![ForecastPeriod::default(); 7],
        };
        assert_eq!(f.visible_periods().len(), MAX_FORECAST_PERIODS);
        assert_eq!(Forecast::default().leading_category(), FlightCategory::Unknown);
    }
}
