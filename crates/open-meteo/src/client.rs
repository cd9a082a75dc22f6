//! HTTP client for the Open-Meteo forecast endpoint.
//!
//! No API key is needed. Requests are blocking; callers running inside an
//! async runtime should wrap them in `spawn_blocking`.

use crate::error::ApiError;
use crate::types::CurrentField;
#[cfg(feature = "blocking")]
use crate::types::WeatherData;

/// Open-Meteo forecast endpoint.
pub const FORECAST_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Build the request URL for the given coordinates and fields.
///
/// Timezone is always `auto` so the reported time is local to the
/// coordinates.
pub fn forecast_url(latitude: f64, longitude: f64, fields: &[CurrentField]) -> String {
    let current: Vec<&str> = fields.iter().map(|f| f.api_name()).collect();
    format!(
        "{}?latitude={}&longitude={}&current={}&timezone=auto",
        FORECAST_API_URL,
        latitude,
        longitude,
        current.join(",")
    )
}

/// Fetch the current conditions at the given coordinates (blocking).
///
/// # Errors
///
/// Returns [`ApiError`] if:
/// - Network request fails
/// - Server returns 429 (rate limited)
/// - Server returns 5xx (server error)
/// - Server returns another unexpected status code
/// - The body is not a forecast response
#[cfg(feature = "blocking")]
pub fn fetch_current(
    latitude: f64,
    longitude: f64,
    fields: &[CurrentField],
) -> Result<WeatherData, ApiError> {
    let client = reqwest::blocking::Client::new();

    let response = client
        .get(forecast_url(latitude, longitude, fields))
        .send()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let body = map_response(response)?;
    WeatherData::from_json(&body)
}

/// Map HTTP response to result, handling error status codes.
#[cfg(feature = "blocking")]
fn map_response(response: reqwest::blocking::Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();

    match status {
        200 => response
            .text()
            .map_err(|e| ApiError::Network(e.to_string())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            Err(ApiError::RateLimited { retry_after })
        }
        500..=599 => Err(ApiError::Server(status)),
        _ => Err(ApiError::Unexpected(status)),
    }
}
