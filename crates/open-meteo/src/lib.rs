//! # open-meteo
//!
//! A small client for the [Open-Meteo](https://open-meteo.com/en/docs)
//! forecast API, limited to the "current conditions" block.
//!
//! ## Features
//!
//! - Typed request fields ([`CurrentField`]) and response structures
//! - Flattened [`WeatherData`] with every field optional
//! - WMO weather code descriptions via [`describe_weather_code`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use open_meteo::{fetch_current, CurrentField};
//!
//! let data = fetch_current(37.7749, -122.4194, CurrentField::ALL)?;
//! println!("{:?} °C", data.temperature);
//! ```

pub mod client;
pub mod codes;
pub mod error;
pub mod types;

#[cfg(feature = "blocking")]
pub use client::fetch_current;
pub use client::{forecast_url, FORECAST_API_URL};
pub use codes::describe_weather_code;
pub use error::ApiError;
pub use types::{CurrentField, WeatherData};
