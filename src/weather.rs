//! Periodic weather refresh for weather widgets.
//!
//! [`WeatherFetcher`] fetches current conditions for every distinct widget
//! location on a fixed interval. The Open-Meteo client is blocking, so each
//! fetch runs on `spawn_blocking` and reports back over an unbounded mpsc
//! channel that the TUI event loop drains between events. The last good
//! reading per location is kept in [`WeatherReadings`]; failed fetches only
//! log a warning.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

use open_meteo::{ApiError, CurrentField, WeatherData};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{WidgetKind, WidgetRecord};

/// Default refresh interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(600);

/// Coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// San Francisco.
    pub const DEFAULT: Location = Location {
        latitude: 37.7749,
        longitude: -122.4194,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Hashable key, rounded to four decimal places (about 11 m).
    pub fn key(&self) -> LocationKey {
        LocationKey(
            (self.latitude * 10_000.0).round() as i64,
            (self.longitude * 10_000.0).round() as i64,
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// Rounded coordinates used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey(i64, i64);

/// Location a weather widget shows: its own coordinates or the fallback.
pub fn widget_location(record: &WidgetRecord, fallback: Location) -> Location {
    record
        .settings
        .as_ref()
        .and_then(|s| s.location())
        .map(|(lat, lon)| Location::new(lat, lon))
        .unwrap_or(fallback)
}

/// Distinct locations of all weather widgets, in widget order.
pub fn weather_locations(widgets: &[WidgetRecord], fallback: Location) -> Vec<Location> {
    let mut seen = HashSet::new();
    widgets
        .iter()
        .filter(|w| w.kind == WidgetKind::Weather)
        .map(|w| widget_location(w, fallback))
        .filter(|loc| seen.insert(loc.key()))
        .collect()
}

/// Result of one fetch, sent back to the event loop.
#[derive(Debug, Clone)]
pub enum WeatherUpdate {
    /// Fresh reading for a location.
    Fetched { location: Location, data: WeatherData },
    /// Fetch failed; the previous reading stays in place.
    Failed { location: Location, error: String },
}

impl WeatherUpdate {
    pub fn location(&self) -> Location {
        match self {
            WeatherUpdate::Fetched { location, .. } | WeatherUpdate::Failed { location, .. } => {
                *location
            }
        }
    }
}

/// Last good reading per location.
#[derive(Debug, Clone, Default)]
pub struct WeatherReadings {
    readings: HashMap<LocationKey, WeatherData>,
    last_error: Option<String>,
}

impl WeatherReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reading for `location`, if one has been fetched.
    pub fn get(&self, location: Location) -> Option<&WeatherData> {
        self.readings.get(&location.key())
    }

    pub fn insert(&mut self, location: Location, data: WeatherData) {
        self.readings.insert(location.key(), data);
    }

    /// Applies a fetch result. Failures keep the previous reading.
    pub fn apply(&mut self, update: WeatherUpdate) {
        match update {
            WeatherUpdate::Fetched { location, data } => {
                self.insert(location, data);
                self.last_error = None;
            }
            WeatherUpdate::Failed { location, error } => {
                warn!(%location, %error, "weather fetch failed, keeping last reading");
                self.last_error = Some(error);
            }
        }
    }

    /// Error message of the most recent failed fetch, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Blocking fetch function, swappable for tests.
pub type FetchFn = fn(Location) -> Result<WeatherData, ApiError>;

/// Fetches every field the weather widget can show.
pub fn fetch_location(location: Location) -> Result<WeatherData, ApiError> {
    open_meteo::fetch_current(location.latitude, location.longitude, CurrentField::ALL)
}

/// Interval-driven weather fetcher.
///
/// Owns the sending half of the update channel. At most one fetch per
/// location is in flight at a time.
pub struct WeatherFetcher {
    tx: mpsc::UnboundedSender<WeatherUpdate>,
    fetch: FetchFn,
    interval: Duration,
    last_refresh: Option<Instant>,
    in_flight: HashSet<LocationKey>,
}

impl WeatherFetcher {
    /// Creates a fetcher using the Open-Meteo client and the receiver for
    /// its updates.
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<WeatherUpdate>) {
        Self::with_fetch(interval, fetch_location)
    }

    /// Creates a fetcher with a custom fetch function.
    pub fn with_fetch(
        interval: Duration,
        fetch: FetchFn,
    ) -> (Self, mpsc::UnboundedReceiver<WeatherUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let fetcher = Self {
            tx,
            fetch,
            interval,
            last_refresh: None,
            in_flight: HashSet::new(),
        };
        (fetcher, rx)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when no refresh has happened yet or the interval has elapsed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_refresh
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Number of fetches currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Starts a fetch for each location not already being fetched.
    ///
    /// Must be called from within a tokio runtime. Returns the number of
    /// fetches started.
    pub fn refresh(&mut self, locations: &[Location], now: Instant) -> usize {
        self.last_refresh = Some(now);
        self.fetch_now(locations)
    }

    /// Starts fetches outside the refresh schedule, for locations that
    /// appeared since the last refresh.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch_now(&mut self, locations: &[Location]) -> usize {
        let mut started = 0;
        for &location in locations {
            if !self.in_flight.insert(location.key()) {
                debug!(%location, "weather fetch already in flight");
                continue;
            }
            debug!(%location, "fetching weather");
            spawn_fetch(location, self.fetch, self.tx.clone());
            started += 1;
        }
        started
    }

    /// Marks the fetch behind `update` as finished.
    pub fn complete(&mut self, update: &WeatherUpdate) {
        self.in_flight.remove(&update.location().key());
    }
}

fn spawn_fetch(location: Location, fetch: FetchFn, tx: mpsc::UnboundedSender<WeatherUpdate>) {
    tokio::spawn(async move {
        let update = match tokio::task::spawn_blocking(move || fetch(location)).await {
            Ok(Ok(data)) => WeatherUpdate::Fetched { location, data },
            Ok(Err(e)) => WeatherUpdate::Failed {
                location,
                error: e.to_string(),
            },
            Err(e) => WeatherUpdate::Failed {
                location,
                error: format!("fetch task panicked: {e}"),
            },
        };
        // The receiver is gone once the TUI has exited.
        let _ = tx.send(update);
    });
}
