//! Widget context providing shared state for widget rendering.
//!
//! Renderers only ever see a borrowed [`WidgetContext`] plus the record they
//! draw; they never hold on to the store.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::weather::{Location, WeatherReadings};

/// Shared context passed to widgets during rendering.
///
/// # Example
///
/// ```
/// use gridboard::widgets::WidgetContext;
/// use std::time::Duration;
///
/// let ctx = WidgetContext::new(chrono::Local::now()).with_uptime(Duration::from_secs(5));
/// assert!(ctx.weather.is_none());
/// assert_eq!(ctx.uptime, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct WidgetContext<'a> {
    /// Wall-clock time for this frame.
    pub now: DateTime<Local>,

    /// Time since the dashboard started, drives the counter animation.
    pub uptime: Duration,

    /// Latest weather readings, `None` when weather is disabled.
    pub weather: Option<&'a WeatherReadings>,

    /// Location used by weather widgets without their own coordinates.
    pub default_location: Location,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context for `now` with no weather data and zero uptime.
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now,
            uptime: Duration::ZERO,
            weather: None,
            default_location: Location::DEFAULT,
        }
    }

    pub fn with_uptime(mut self, uptime: Duration) -> Self {
        self.uptime = uptime;
        self
    }

    pub fn with_weather(mut self, weather: &'a WeatherReadings) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_default_location(mut self, location: Location) -> Self {
        self.default_location = location;
        self
    }
}
