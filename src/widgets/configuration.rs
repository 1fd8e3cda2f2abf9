//! Typed accessors over a widget's untyped configuration record.
//!
//! Every failure is a [`ConfigError`] naming the widget type and the field
//! (nested fields use a path such as `items[2].name`).

use crate::error::ConfigError;
use crate::structure::WidgetId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Read-only view of one configuration object.
#[derive(Debug, Clone)]
pub struct Configuration<'a> {
    widget: &'static str,
    path: Option<String>,
    raw: &'a Map<String, Value>,
}

impl<'a> Configuration<'a> {
    pub fn new(widget: &'static str, raw: &'a Map<String, Value>) -> Self {
        Self {
            widget,
            path: None,
            raw,
        }
    }

    pub fn widget(&self) -> &'static str {
        self.widget
    }

    /// Field name as reported in errors.
    fn field_name(&self, field: &str) -> String {
        match &self.path {
            Some(path) => format!("{path}.{field}"),
            None => field.to_string(),
        }
    }

    pub fn error(&self, field: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::new(self.widget, self.field_name(field), reason)
    }

    /// True when `field` is present, even if `null`.
    pub fn has(&self, field: &str) -> bool {
        self.raw.contains_key(field)
    }

    /// Value of `field`; `null` counts as absent.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.raw.get(field).filter(|value| !value.is_null())
    }

    pub fn require(&self, field: &str) -> Result<&'a Value, ConfigError> {
        self.get(field).ok_or_else(|| self.error(field, "is required"))
    }

    /// Required string or number, rendered as a string.
    pub fn label(&self, field: &str) -> Result<String, ConfigError> {
        match self.require(field)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(self.error(field, "must be a string or a number")),
        }
    }

    /// Required string, number, or boolean, rendered as a string.
    pub fn text(&self, field: &str) -> Result<String, ConfigError> {
        match self.require(field)? {
            Value::Bool(b) => Ok(b.to_string()),
            Value::String(_) | Value::Number(_) => self.label(field),
            _ => Err(self.error(field, "must be a string, number or boolean")),
        }
    }

    /// Required key holding a widget reference; `null` means "no widget".
    pub fn reference(&self, field: &str) -> Result<Option<WidgetId>, ConfigError> {
        let Some(value) = self.raw.get(field) else {
            return Err(self.error(field, "is required"));
        };
        if value.is_null() {
            return Ok(None);
        }
        WidgetId::from_value(value)
            .map(Some)
            .ok_or_else(|| self.error(field, "must be a widget reference (index or key)"))
    }

    /// Optional field deserialized into `T` (typically a lowercase enum).
    pub fn optional<T: DeserializeOwned>(&self, field: &str, expected: &str) -> Result<Option<T>, ConfigError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|_| self.error(field, format!("must be {expected}"))),
        }
    }

    /// Required non-empty array.
    pub fn array(&self, field: &str) -> Result<&'a [Value], ConfigError> {
        match self.require(field)? {
            Value::Array(items) if items.is_empty() => Err(self.error(field, "must not be empty")),
            Value::Array(items) => Ok(items),
            _ => Err(self.error(field, "must be an array")),
        }
    }

    /// Required non-empty array of positive numbers.
    pub fn positive_numbers(&self, field: &str) -> Result<Vec<f64>, ConfigError> {
        self.array(field)?
            .iter()
            .enumerate()
            .map(|(index, value)| match value.as_f64() {
                Some(n) if n > 0.0 && n.is_finite() => Ok(n),
                _ => Err(self.error(
                    &format!("{field}[{index}]"),
                    "must be a number greater than 0",
                )),
            })
            .collect()
    }

    /// View an array element as a nested configuration object.
    pub fn nested(&self, path: impl Into<String>, value: &'a Value) -> Result<Configuration<'a>, ConfigError> {
        let path = self.field_name(&path.into());
        match value {
            Value::Object(raw) => Ok(Configuration {
                widget: self.widget,
                path: Some(path),
                raw,
            }),
            _ => Err(ConfigError::new(self.widget, path, "must be an object")),
        }
    }
}
