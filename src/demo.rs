/*
 *  demo.rs
 *
 *  AvHUD - aviation weather at a glance
 *	(c) 2025-26 Stuart Hunter
 *
 *	Canned weather for running without network or API token
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

use std::time::{SystemTime, UNIX_EPOCH};

use crate::weather::{
    ceiling_from_layers, CloudLayer, FlightCategory, Forecast, ForecastPeriod, WeatherError,
    WeatherSnapshot, WeatherSource,
};

/// Seconds each canned scenario stays current.
pub const SCENARIO_SECS: u64 = 30;
pub const SCENARIO_COUNT: usize = 5;

struct Scenario {
    category: FlightCategory,
    temperature: i32,
    dewpoint: i32,
    wind_speed: u32,
    wind_direction: u16,
    visibility: f64,
    altimeter: f64,
    conditions: &'static [&'static str],
    cloud: (&'static str, u32),
}

static SCENARIOS: [Scenario; SCENARIO_COUNT] = [
    Scenario {
        category: FlightCategory::Vfr,
        temperature: 22,
        dewpoint: 14,
        wind_speed: 8,
        wind_direction: 270,
        visibility: 10.0,
        altimeter: 30.12,
        conditions: &[],
        cloud: ("FEW", 50),
    },
    Scenario {
        category: FlightCategory::Mvfr,
        temperature: 15,
        dewpoint: 12,
        wind_speed: 12,
        wind_direction: 180,
        visibility: 5.0,
        altimeter: 29.92,
        conditions: &["BR"],
        cloud: ("BKN", 25),
    },
    Scenario {
        category: FlightCategory::Ifr,
        temperature: 8,
        dewpoint: 7,
        wind_speed: 18,
        wind_direction: 90,
        visibility: 2.0,
        altimeter: 29.75,
        conditions: &["RA"],
        cloud: ("OVC", 12),
    },
    Scenario {
        category: FlightCategory::Vfr,
        temperature: 28,
        dewpoint: 18,
        wind_speed: 5,
        wind_direction: 45,
        visibility: 10.0,
        altimeter: 30.25,
        conditions: &[],
        cloud: ("SCT", 80),
    },
    Scenario {
        category: FlightCategory::Mvfr,
        temperature: -2,
        dewpoint: -4,
        wind_speed: 15,
        wind_direction: 0,
        visibility: 4.0,
        altimeter: 30.05,
        conditions: &["SN"],
        cloud: ("OVC", 20),
    },
];

/// Canned snapshot for scenario `index` (taken modulo the scenario count).
pub fn scenario(station: &str, index: usize) -> WeatherSnapshot {
    let s = &SCENARIOS[index % SCENARIO_COUNT];
    let clouds = vec![CloudLayer::new(s.cloud.0, s.cloud.1)];
    WeatherSnapshot {
        station: station.to_ascii_uppercase(),
        temperature: Some(s.temperature),
        dewpoint: Some(s.dewpoint),
        wind_direction: Some(s.wind_direction),
        wind_speed: Some(s.wind_speed),
        visibility: Some(s.visibility),
        ceiling: ceiling_from_layers(&clouds),
        altimeter: Some(s.altimeter),
        category: s.category,
        conditions: s.conditions.iter().map(|c| c.to_string()).collect(),
        clouds,
    }
}

pub fn demo_forecast(station: &str) -> Forecast {
    let period = |start: &str, dir, spd, category, ceiling| ForecastPeriod {
        start_time: start.to_string(),
        wind_direction: Some(dir),
        wind_speed: Some(spd),
        category,
        ceiling,
    };
    Forecast {
        station: station.to_ascii_uppercase(),
        periods: vec![
            period("1800", 270, 10, FlightCategory::Vfr, None),
            period("2100", 180, 15, FlightCategory::Mvfr, Some(2500)),
            period("0000", 90, 20, FlightCategory::Ifr, Some(900)),
            period("0300", 60, 8, FlightCategory::Lifr, Some(400)),
        ],
    }
}

/// Offline source that cycles through a few representative reports on a
/// wall-clock schedule.
#[derive(Debug, Default)]
pub struct DemoSource {
    // fixed scenario for tests, None follows the clock
    pinned: Option<usize>,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned(index: usize) -> Self {
        Self { pinned: Some(index) }
    }

    fn current_index(&self) -> usize {
        self.pinned.unwrap_or_else(|| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            ((secs / SCENARIO_SECS) % SCENARIO_COUNT as u64) as usize
        })
    }
}

impl WeatherSource for DemoSource {
    fn fetch_current(&mut self, station: &str) -> Result<WeatherSnapshot, WeatherError> {
        Ok(scenario(station, self.current_index()))
    }

    fn fetch_forecast(&mut self, station: &str) -> Result<Forecast, WeatherError> {
        Ok(demo_forecast(station))
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}
