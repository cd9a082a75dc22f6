//! Type definitions for Open-Meteo forecast responses.
//!
//! Only the `current` block is modelled. Every measurement is optional
//! because the API only returns the fields that were requested.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::codes::describe_weather_code;
use crate::error::ApiError;

/// A "current conditions" variable that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentField {
    /// Air temperature at 2 m.
    Temperature,
    /// Relative humidity at 2 m.
    Humidity,
    /// Wind speed at 10 m.
    WindSpeed,
    /// WMO weather interpretation code.
    WeatherCode,
    /// Mean sea level pressure.
    Pressure,
}

impl CurrentField {
    /// Every supported field, in request order.
    pub const ALL: &'static [CurrentField] = &[
        CurrentField::Temperature,
        CurrentField::Humidity,
        CurrentField::WindSpeed,
        CurrentField::WeatherCode,
        CurrentField::Pressure,
    ];

    /// Name of the variable in the `current=` query parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            CurrentField::Temperature => "temperature_2m",
            CurrentField::Humidity => "relative_humidity_2m",
            CurrentField::WindSpeed => "wind_speed_10m",
            CurrentField::WeatherCode => "weather_code",
            CurrentField::Pressure => "sea_level_pressure",
        }
    }
}

/// Raw response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Current conditions.
    pub current: CurrentBlock,
    /// Units keyed by variable name (e.g. `"temperature_2m": "°C"`).
    #[serde(default)]
    pub current_units: HashMap<String, String>,
}

/// The `current` object as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    /// Local observation time, `YYYY-MM-DDTHH:MM`.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<u16>,
    #[serde(default)]
    pub sea_level_pressure: Option<f64>,
}

/// Flattened current weather reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Temperature in the unit reported by the API (°C by default).
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Wind speed (km/h by default).
    pub wind_speed: Option<f64>,
    /// WMO weather code.
    pub weather_code: Option<u16>,
    /// Sea level pressure in hPa.
    pub pressure: Option<f64>,
    /// Observation time as reported.
    pub time: Option<String>,
}

impl WeatherData {
    /// Parse a forecast response body.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let response: ForecastResponse =
            serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(response.into())
    }

    /// Human-readable description of the weather code.
    pub fn description(&self) -> &'static str {
        describe_weather_code(self.weather_code)
    }

    /// Observation time parsed as a local timestamp.
    ///
    /// Returns `None` when the time is missing or not in the
    /// `YYYY-MM-DDTHH:MM` format the API uses.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        let time = self.time.as_deref()?;
        NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

impl From<ForecastResponse> for WeatherData {
    fn from(response: ForecastResponse) -> Self {
        let current = response.current;
        Self {
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            weather_code: current.weather_code,
            pressure: current.sea_level_pressure,
            time: current.time,
        }
    }
}
