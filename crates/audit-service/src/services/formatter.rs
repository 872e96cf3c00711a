//! Field formatter registry
//!
//! Compiles each field descriptor into a formatter once and caches it
//! process-wide. Formatting never fails: malformed or dangling data
//! degrades to a visible fallback.

use std::collections::HashMap;
use std::fmt::{Display, Write};
use std::sync::Arc;

use audit_common::{config::validate_date_format, ConfigError, HistoryConfig};
use audit_core::entities::{ChoiceSet, DisplayValue, FieldDescriptor, FieldKind, EMPTY_CHOICE};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use tracing::trace;

/// Storage markers the trigger writes for booleans
const TRUE_MARKER: &str = "t";
const FALSE_MARKER: &str = "f";

/// Date rendering formats (chrono `strftime` syntax)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateFormats {
    pub date: String,
    pub date_time: String,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self::from(&HistoryConfig::default())
    }
}

impl DateFormats {
    /// Reject format strings chrono cannot render
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_date_format("HISTORY_DATE_FORMAT", &self.date)?;
        validate_date_format("HISTORY_DATETIME_FORMAT", &self.date_time)
    }
}

impl From<&HistoryConfig> for DateFormats {
    fn from(config: &HistoryConfig) -> Self {
        Self {
            date: config.date_format.clone(),
            date_time: config.datetime_format.clone(),
        }
    }
}

/// Display strings of referenced rows that still exist, per entity type
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    labels: HashMap<String, HashMap<String, String>>,
}

impl ReferenceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rows found for an entity type
    pub fn insert_all(&mut self, entity_type: &str, found: HashMap<String, String>) {
        self.labels
            .entry(entity_type.to_string())
            .or_default()
            .extend(found);
    }

    /// Display string of a referenced row, if it still exists
    pub fn label(&self, entity_type: &str, id: &str) -> Option<&str> {
        self.labels
            .get(entity_type)
            .and_then(|rows| rows.get(id))
            .map(String::as_str)
    }
}

/// Cache key: the parts of a descriptor that decide formatting
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatterKey {
    pub field: String,
    pub kind: FieldKind,
}

impl From<&FieldDescriptor> for FormatterKey {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            field: field.name.clone(),
            kind: field.kind.clone(),
        }
    }
}

/// Compiled formatting rule of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFormatter {
    Choice(ChoiceSet),
    Reference { target: String },
    Boolean,
    Date { format: String },
    DateTime { format: String },
    Plain,
}

impl FieldFormatter {
    /// Compile a descriptor, first matching rule wins
    pub fn compile(field: &FieldDescriptor, formats: &DateFormats) -> Self {
        match &field.kind {
            FieldKind::Choice { choices } => Self::Choice(choices.clone()),
            FieldKind::Reference { target } | FieldKind::ManyReference { target } => {
                Self::Reference {
                    target: target.clone(),
                }
            }
            FieldKind::Boolean => Self::Boolean,
            FieldKind::Date => Self::Date {
                format: formats.date.clone(),
            },
            FieldKind::DateTime => Self::DateTime {
                format: formats.date_time.clone(),
            },
            FieldKind::Plain => Self::Plain,
        }
    }

    /// Format a raw stored value
    pub fn format(&self, raw: Option<&str>, refs: &ReferenceSnapshot) -> DisplayValue {
        match self {
            Self::Choice(choices) => match raw {
                None => DisplayValue::text(EMPTY_CHOICE),
                Some(value) => DisplayValue::text(choices.label_for(value).unwrap_or(value)),
            },
            Self::Reference { target } => match raw {
                None => DisplayValue::no_value(),
                Some(id) => match refs.label(target, id) {
                    Some(label) => DisplayValue::Reference {
                        entity_type: target.clone(),
                        id: id.to_string(),
                        label: label.to_string(),
                    },
                    None => DisplayValue::DeletedReference {
                        entity_type: target.clone(),
                        id: id.to_string(),
                    },
                },
            },
            Self::Boolean => match raw {
                None => DisplayValue::no_value(),
                Some(TRUE_MARKER) => DisplayValue::text("yes"),
                Some(FALSE_MARKER) => DisplayValue::text("no"),
                Some(other) => DisplayValue::text(other),
            },
            Self::Date { format } => match raw {
                None => DisplayValue::no_value(),
                Some(value) => DisplayValue::text(match parse_date(value) {
                    Some(d) => render_or_raw(d.format(format), value),
                    None => value.to_string(),
                }),
            },
            Self::DateTime { format } => match raw {
                None => DisplayValue::no_value(),
                Some(value) => DisplayValue::text(match parse_date_time(value) {
                    Some(dt) => render_or_raw(dt.format(format), value),
                    None => value.to_string(),
                }),
            },
            Self::Plain => match raw {
                None => DisplayValue::no_value(),
                Some(value) => DisplayValue::text(value),
            },
        }
    }
}

/// chrono reports bad specifiers as a `fmt::Error`; the raw value stands in
fn render_or_raw(formatted: impl Display, raw: &str) -> String {
    let mut out = String::new();
    if write!(out, "{formatted}").is_err() {
        trace!(raw, "Date format failed to render");
        return raw.to_string();
    }
    out
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_date_time(raw).map(|dt| dt.date()))
}

/// Parse the text forms PostgreSQL and ISO 8601 produce.
///
/// Values carrying an offset are rendered in that offset's wall-clock time.
fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_local());
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Process-wide cache of compiled formatters
#[derive(Debug, Default)]
pub struct FormatterRegistry {
    formats: DateFormats,
    cache: DashMap<FormatterKey, Arc<FieldFormatter>>,
}

impl FormatterRegistry {
    /// Create a registry rendering dates with `formats`
    pub fn new(formats: DateFormats) -> Self {
        Self {
            formats,
            cache: DashMap::new(),
        }
    }

    /// Formatter for a descriptor, compiled on first use
    pub fn formatter(&self, field: &FieldDescriptor) -> Arc<FieldFormatter> {
        let key = FormatterKey::from(field);
        if let Some(formatter) = self.cache.get(&key) {
            return Arc::clone(formatter.value());
        }

        trace!(field = %field.name, kind = field.kind.name(), "Compiling formatter");
        let formatter = Arc::new(FieldFormatter::compile(field, &self.formats));
        Arc::clone(self.cache.entry(key).or_insert(formatter).value())
    }

    /// Number of compiled formatters
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn formats(&self) -> &DateFormats {
        &self.formats
    }
}
