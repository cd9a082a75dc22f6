//! Settings editor for the selected widget.
//!
//! Opens as a popup over the grid. Text fields (title, subtitle and the
//! weather coordinates) are typed into a line buffer that is written back to
//! the draft when focus leaves the field. Weather display options are
//! toggles flipped with `Space`. Nothing reaches the store until the draft
//! is applied.

use thiserror::Error;

use crate::{WidgetId, WidgetKind, WidgetRecord, WidgetSettings};

/// A row of the settings editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Subtitle,
    Latitude,
    Longitude,
    ShowTemperature,
    ShowHumidity,
    ShowWindSpeed,
    ShowWeatherCode,
    ShowPressure,
}

const COMMON_FIELDS: &[EditField] = &[EditField::Title, EditField::Subtitle];

const WEATHER_FIELDS: &[EditField] = &[
    EditField::Title,
    EditField::Subtitle,
    EditField::Latitude,
    EditField::Longitude,
    EditField::ShowTemperature,
    EditField::ShowHumidity,
    EditField::ShowWindSpeed,
    EditField::ShowWeatherCode,
    EditField::ShowPressure,
];

impl EditField {
    /// Rows offered for a widget kind, top to bottom.
    pub fn for_kind(kind: WidgetKind) -> &'static [EditField] {
        match kind {
            WidgetKind::Weather => WEATHER_FIELDS,
            _ => COMMON_FIELDS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditField::Title => "Title",
            EditField::Subtitle => "Subtitle",
            EditField::Latitude => "Latitude",
            EditField::Longitude => "Longitude",
            EditField::ShowTemperature => "Temperature",
            EditField::ShowHumidity => "Humidity",
            EditField::ShowWindSpeed => "Wind Speed",
            EditField::ShowWeatherCode => "Condition",
            EditField::ShowPressure => "Pressure",
        }
    }

    /// Whether the row is a checkbox rather than a text field.
    pub fn is_toggle(self) -> bool {
        matches!(
            self,
            EditField::ShowTemperature
                | EditField::ShowHumidity
                | EditField::ShowWindSpeed
                | EditField::ShowWeatherCode
                | EditField::ShowPressure
        )
    }

    /// Accepted range for coordinate fields.
    fn range(self) -> Option<(f64, f64)> {
        match self {
            EditField::Latitude => Some((-90.0, 90.0)),
            EditField::Longitude => Some((-180.0, 180.0)),
            _ => None,
        }
    }
}

/// Invalid text in a coordinate field.
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Editing state for one widget's settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsEditor {
    /// Widget being edited.
    pub id: WidgetId,
    /// Its kind, which decides the rows.
    pub kind: WidgetKind,
    /// Last rejected input, shown under the rows.
    pub error: Option<String>,
    draft: WidgetSettings,
    focus: usize,
    buffer: String,
}

impl SettingsEditor {
    /// Starts editing `record`'s current settings with the first row focused.
    pub fn open(record: &WidgetRecord) -> Self {
        let mut editor = Self {
            id: record.id,
            kind: record.kind,
            error: None,
            draft: record.settings_or_default(),
            focus: 0,
            buffer: String::new(),
        };
        editor.load_buffer();
        editor
    }

    pub fn fields(&self) -> &'static [EditField] {
        EditField::for_kind(self.kind)
    }

    pub fn focused(&self) -> EditField {
        self.fields()[self.focus]
    }

    /// Text typed into the focused field so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Settings as they stand after the last committed field.
    pub fn draft(&self) -> &WidgetSettings {
        &self.draft
    }

    /// Display value of a row: the live buffer for the focused text field,
    /// the committed value otherwise, `[x]`/`[ ]` for toggles.
    pub fn value_text(&self, field: EditField) -> String {
        if field.is_toggle() {
            return if self.toggle_value(field) { "[x]" } else { "[ ]" }.to_string();
        }
        if field == self.focused() {
            return self.buffer.clone();
        }
        self.stored_text(field)
    }

    /// Types `c` into the focused text field, or flips the focused toggle on
    /// `Space`.
    pub fn input(&mut self, c: char) {
        if self.focused().is_toggle() {
            if c == ' ' {
                self.toggle();
            }
            return;
        }
        self.buffer.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if !self.focused().is_toggle() {
            self.buffer.pop();
            self.error = None;
        }
    }

    /// Flips the focused toggle. Text fields are left alone.
    pub fn toggle(&mut self) {
        let field = self.focused();
        if !field.is_toggle() {
            return;
        }
        let value = Some(!self.toggle_value(field));
        let draft = &mut self.draft;
        match field {
            EditField::ShowTemperature => draft.show_temperature = value,
            EditField::ShowHumidity => draft.show_humidity = value,
            EditField::ShowWindSpeed => draft.show_wind_speed = value,
            EditField::ShowWeatherCode => draft.show_weather_code = value,
            EditField::ShowPressure => draft.show_pressure = value,
            _ => {}
        }
    }

    /// Commits the focused field and moves down, wrapping around.
    ///
    /// Focus stays put when the field's text is invalid.
    pub fn focus_next(&mut self) -> Result<(), EditError> {
        self.commit()?;
        self.focus = (self.focus + 1) % self.fields().len();
        self.load_buffer();
        Ok(())
    }

    /// Commits the focused field and moves up, wrapping around.
    pub fn focus_previous(&mut self) -> Result<(), EditError> {
        self.commit()?;
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
        self.load_buffer();
        Ok(())
    }

    /// Commits the focused field and returns the finished settings.
    pub fn apply(&mut self) -> Result<WidgetSettings, EditError> {
        self.commit()?;
        Ok(self.draft.clone())
    }

    /// Writes the buffer into the draft. Empty text clears the field.
    fn commit(&mut self) -> Result<(), EditError> {
        let field = self.focused();
        if field.is_toggle() {
            return Ok(());
        }
        let text = self.buffer.trim();
        let result = match field {
            EditField::Title => {
                self.draft.title = non_empty(text);
                Ok(())
            }
            EditField::Subtitle => {
                self.draft.subtitle = non_empty(text);
                Ok(())
            }
            EditField::Latitude => {
                parse_coordinate(field, text).map(|value| self.draft.latitude = value)
            }
            EditField::Longitude => {
                parse_coordinate(field, text).map(|value| self.draft.longitude = value)
            }
            _ => Ok(()),
        };
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    fn load_buffer(&mut self) {
        let field = self.focused();
        self.buffer = if field.is_toggle() {
            String::new()
        } else {
            self.stored_text(field)
        };
        self.error = None;
    }

    fn stored_text(&self, field: EditField) -> String {
        let draft = &self.draft;
        match field {
            EditField::Title => draft.title.clone().unwrap_or_default(),
            EditField::Subtitle => draft.subtitle.clone().unwrap_or_default(),
            EditField::Latitude => draft.latitude.map(|v| v.to_string()).unwrap_or_default(),
            EditField::Longitude => draft.longitude.map(|v| v.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn toggle_value(&self, field: EditField) -> bool {
        let draft = &self.draft;
        match field {
            EditField::ShowTemperature => draft.show_temperature(),
            EditField::ShowHumidity => draft.show_humidity(),
            EditField::ShowWindSpeed => draft.show_wind_speed(),
            EditField::ShowWeatherCode => draft.show_weather_code(),
            EditField::ShowPressure => draft.show_pressure(),
            _ => false,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn parse_coordinate(field: EditField, text: &str) -> Result<Option<f64>, EditError> {
    if text.is_empty() {
        return Ok(None);
    }
    let value: f64 = text.parse().map_err(|_| EditError::NotANumber {
        field: field.label(),
    })?;
    match field.range() {
        Some((min, max)) if !(min..=max).contains(&value) => Err(EditError::OutOfRange {
            field: field.label(),
            min,
            max,
        }),
        _ => Ok(Some(value)),
    }
}
