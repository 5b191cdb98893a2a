/*
 *  avwx.rs
 *
 *  AvHUD - aviation weather at a glance
 *	(c) 2025-26 Stuart Hunter
 *
 *	METAR and TAF from the AVWX REST API
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

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::runtime::{Builder, Runtime};

use crate::weather::{
    ceiling_from_layers, CloudLayer, FlightCategory, Forecast, ForecastPeriod, WeatherError,
    WeatherSnapshot, WeatherSource,
};

const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
pub const AVWX_BASE_URL: &str = "https://avwx.rest/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// AVWX wraps most numbers as {"repr": "...", "value": n}
#[derive(Debug, Default, Deserialize)]
struct Number {
    value: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Cloud {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    altitude: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct WxCode {
    repr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Timestamp {
    dt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MetarResponse {
    station: Option<String>,
    flight_rules: Option<String>,
    temperature: Option<Number>,
    dewpoint: Option<Number>,
    wind_direction: Option<Number>,
    wind_speed: Option<Number>,
    visibility: Option<Number>,
    altimeter: Option<Number>,
    clouds: Option<Vec<Option<Cloud>>>,
    wx_codes: Option<Vec<Option<WxCode>>>,
}

#[derive(Debug, Default, Deserialize)]
struct TafPeriod {
    start_time: Option<Timestamp>,
    flight_rules: Option<String>,
    wind_direction: Option<Number>,
    wind_speed: Option<Number>,
    clouds: Option<Vec<Option<Cloud>>>,
}

#[derive(Debug, Default, Deserialize)]
struct TafResponse {
    station: Option<String>,
    forecast: Option<Vec<TafPeriod>>,
}

fn value(n: &Option<Number>) -> Option<f64> {
    n.as_ref().and_then(|n| n.value).filter(|v| v.is_finite())
}

fn whole(n: &Option<Number>) -> Option<i32> {
    value(n).map(|v| v.round() as i32)
}

fn knots(n: &Option<Number>) -> Option<u32> {
    value(n).filter(|v| *v >= 0.0).map(|v| v.round() as u32)
}

// VRB arrives as a null value
fn bearing(n: &Option<Number>) -> Option<u16> {
    value(n)
        .filter(|v| *v >= 0.0)
        .map(|v| (v.round() as u32 % 360) as u16)
}

fn layers(clouds: &Option<Vec<Option<Cloud>>>) -> Vec<CloudLayer> {
    clouds
        .iter()
        .flatten()
        .flatten()
        .map(|c| CloudLayer {
            kind: c.kind.clone().unwrap_or_default(),
            altitude: c.altitude,
        })
        .collect()
}

/// RFC 3339 timestamp to UTC HHMM, empty when it does not parse.
fn utc_hhmm(dt: &str) -> String {
    DateTime::parse_from_rfc3339(dt)
        .map(|t| t.with_timezone(&Utc).format("%H%M").to_string())
        .unwrap_or_default()
}

fn metar_to_snapshot(station: &str, m: MetarResponse) -> WeatherSnapshot {
    let clouds = layers(&m.clouds);
    WeatherSnapshot {
        station: m.station.unwrap_or_else(|| station.to_string()),
        temperature: whole(&m.temperature),
        dewpoint: whole(&m.dewpoint),
        wind_direction: bearing(&m.wind_direction),
        wind_speed: knots(&m.wind_speed),
        visibility: value(&m.visibility).filter(|v| *v >= 0.0),
        ceiling: ceiling_from_layers(&clouds),
        altimeter: value(&m.altimeter),
        category: FlightCategory::parse(m.flight_rules.as_deref().unwrap_or("")),
        conditions: m
            .wx_codes
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|w| w.repr)
            .collect(),
        clouds,
    }
}

fn taf_to_forecast(station: &str, t: TafResponse) -> Forecast {
    let periods = t
        .forecast
        .into_iter()
        .flatten()
        .map(|p| ForecastPeriod {
            start_time: p
                .start_time
                .and_then(|s| s.dt)
                .map(|dt| utc_hhmm(&dt))
                .unwrap_or_default(),
            wind_direction: bearing(&p.wind_direction),
            wind_speed: knots(&p.wind_speed),
            category: FlightCategory::parse(p.flight_rules.as_deref().unwrap_or("")),
            ceiling: ceiling_from_layers(&layers(&p.clouds)),
        })
        .collect();
    Forecast {
        station: t.station.unwrap_or_else(|| station.to_string()),
        periods,
    }
}

async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, WeatherError> {
    let resp = client.get(url).send().await?;
    match resp.status() {
        s if s.is_success() => {
            let body = resp.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        }
        StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
        s => Err(WeatherError::Status(s.as_u16())),
    }
}

/// Live METAR/TAF source. Blocking from the caller's view: requests run on a
/// private current-thread runtime.
pub struct AvwxSource {
    base_url: String,
    client: Client,
    runtime: Runtime,
}

impl AvwxSource {
    pub fn new(api_token: Option<&str>) -> Result<Self, WeatherError> {
        Self::with_base_url(AVWX_BASE_URL, api_token)
    }

    pub fn with_base_url(base_url: &str, api_token: Option<&str>) -> Result<Self, WeatherError> {
        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        if let Some(token) = api_token.filter(|t| !t.is_empty()) {
            let mut bearer = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| WeatherError::Unavailable(format!("bad API token: {}", e)))?;
            bearer.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, bearer);
        } else {
            info!("No AVWX token configured, requests may be rejected");
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            runtime,
        })
    }

    fn get<T: DeserializeOwned>(&self, kind: &str, station: &str) -> Result<T, WeatherError> {
        let url = format!("{}/{}/{}", self.base_url, kind, station.to_ascii_uppercase());
        debug!("GET {}", url);
        self.runtime.block_on(fetch_json(&self.client, &url))
    }
}

impl WeatherSource for AvwxSource {
    fn fetch_current(&mut self, station: &str) -> Result<WeatherSnapshot, WeatherError> {
        let m: MetarResponse = self.get("metar", station)?;
        Ok(metar_to_snapshot(station, m))
    }

    fn fetch_forecast(&mut self, station: &str) -> Result<Forecast, WeatherError> {
        let t: TafResponse = self.get("taf", station)?;
        Ok(taf_to_forecast(station, t))
    }

    fn name(&self) -> &'static str {
        "avwx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METAR: &str = r#"{
        "station": "KDEN",
        "flight_rules": "MVFR",
        "temperature": {"repr": "15", "value": 15},
        "dewpoint": {"repr": "M02", "value": -2},
        "wind_direction": {"repr": "270", "value": 270},
        "wind_speed": {"repr": "12", "value": 12},
        "visibility": {"repr": "5", "value": 5.0},
        "altimeter": {"repr": "A2992", "value": 29.92},
        "clouds": [
            {"repr": "FEW015", "type": "FEW", "altitude": 15},
            {"repr": "BKN025", "type": "BKN", "altitude": 25},
            null
        ],
        "wx_codes": [{"repr": "-RA", "value": "Light Rain"}, {"repr": "BR", "value": "Mist"}]
    }"#;

    #[test]
    fn metar_maps_to_snapshot() {
        let m: MetarResponse = serde_json::from_str(METAR).unwrap();
        let s = metar_to_snapshot("kden", m);
        assert_eq!(s.station, "KDEN");
        assert_eq!(s.category, FlightCategory::Mvfr);
        assert_eq!(s.temperature, Some(15));
        assert_eq!(s.dewpoint, Some(-2));
        assert_eq!(s.wind_direction, Some(270));
        assert_eq!(s.wind_speed, Some(12));
        assert_eq!(s.visibility, Some(5.0));
        assert_eq!(s.altimeter, Some(29.92));
        assert_eq!(s.ceiling, Some(2500));
        assert_eq!(s.clouds.len(), 2);
        assert_eq!(s.conditions, vec!["-RA".to_string(), "BR".to_string()]);
    }

    #[test]
    fn sparse_metar_leaves_fields_absent() {
        let m: MetarResponse = serde_json::from_str(
            r#"{"wind_direction": {"repr": "VRB", "value": null}, "temperature": null}"#,
        )
        .unwrap();
        let s = metar_to_snapshot("KBOS", m);
        assert_eq!(s.station, "KBOS");
        assert_eq!(s.wind_direction, None);
        assert_eq!(s.temperature, None);
        assert_eq!(s.ceiling, None);
        assert_eq!(s.category, FlightCategory::Unknown);
        assert!(s.conditions.is_empty());
    }

    #[test]
    fn taf_periods_keep_order_and_times() {
        let t: TafResponse = serde_json::from_str(
            r#"{
                "station": "KDEN",
                "forecast": [
                    {"start_time": {"dt": "2025-06-01T18:00:00Z"}, "flight_rules": "VFR",
                     "wind_direction": {"value": 270}, "wind_speed": {"value": 10},
                     "clouds": [{"type": "SCT", "altitude": 80}]},
                    {"start_time": {"dt": "2025-06-02T03:30:00+00:00"}, "flight_rules": "IFR",
                     "clouds": [{"type": "OVC", "altitude": 8}]},
                    {"start_time": {"dt": "not a time"}}
                ]
            }"#,
        )
        .unwrap();
        let f = taf_to_forecast("KDEN", t);
        assert_eq!(f.periods.len(), 3);
        assert_eq!(f.periods[0].start_time, "1800");
        assert_eq!(f.periods[0].wind_direction, Some(270));
        assert_eq!(f.periods[0].ceiling, None);
        assert_eq!(f.periods[1].start_time, "0330");
        assert_eq!(f.periods[1].category, FlightCategory::Ifr);
        assert_eq!(f.periods[1].ceiling, Some(800));
        assert_eq!(f.periods[2].start_time, "");
    }

    #[test]
    fn bearing_normalises_360() {
        assert_eq!(bearing(&Some(Number { value: Some(360.0) })), Some(0));
        assert_eq!(bearing(&Some(Number { value: Some(-10.0) })), None);
    }
}
