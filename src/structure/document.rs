//! Serialized structure document: widget records, type table, root id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a widget record: a list index or a mapping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetId {
    Index(usize),
    Key(String),
}

impl WidgetId {
    /// Interpret a JSON value as an identifier (non-negative integer or string).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Self::Index),
            Value::String(s) => Some(Self::Key(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl From<usize> for WidgetId {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for WidgetId {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

/// One `[typeIndex, configuration]` record.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRecord {
    pub type_index: usize,
    pub configuration: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
enum Widgets {
    List(Vec<WidgetRecord>),
    Map(BTreeMap<String, WidgetRecord>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWidgets {
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

#[derive(Deserialize)]
struct RawDocument {
    widgets: RawWidgets,
    types: Vec<String>,
    main: WidgetId,
}

/// A parsed structure document.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDocument {
    widgets: Widgets,
    types: Vec<String>,
    main: WidgetId,
}

impl StructureDocument {
    /// Parse a JSON body. The error is a human-readable reason.
    pub fn parse(body: &[u8]) -> Result<Self, String> {
        let raw: RawDocument = serde_json::from_slice(body).map_err(|err| err.to_string())?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, String> {
        let raw: RawDocument = serde_json::from_value(value).map_err(|err| err.to_string())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self, String> {
        let widgets = match raw.widgets {
            RawWidgets::List(items) => Widgets::List(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| parse_record(&index.to_string(), item))
                    .collect::<Result<_, _>>()?,
            ),
            RawWidgets::Map(items) => Widgets::Map(
                items
                    .into_iter()
                    .map(|(key, item)| parse_record(&key, item).map(|record| (key, record)))
                    .collect::<Result<_, _>>()?,
            ),
        };
        Ok(Self {
            widgets,
            types: raw.types,
            main: raw.main,
        })
    }

    /// Root widget identifier.
    pub fn main(&self) -> &WidgetId {
        &self.main
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// True for the named-key (mapping) variant.
    pub fn is_keyed(&self) -> bool {
        matches!(self.widgets, Widgets::Map(_))
    }

    pub fn len(&self) -> usize {
        match &self.widgets {
            Widgets::List(items) => items.len(),
            Widgets::Map(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a record. Numeric strings address list positions and integers
    /// address mapping keys.
    pub fn record(&self, id: &WidgetId) -> Option<&WidgetRecord> {
        match (&self.widgets, id) {
            (Widgets::List(items), WidgetId::Index(index)) => items.get(*index),
            (Widgets::List(items), WidgetId::Key(key)) => {
                key.parse::<usize>().ok().and_then(|index| items.get(index))
            }
            (Widgets::Map(items), WidgetId::Key(key)) => items.get(key),
            (Widgets::Map(items), WidgetId::Index(index)) => items.get(&index.to_string()),
        }
    }
}

impl StructureDocument {
    /// `id` in the form this document's records are addressed by: indices
    /// for the list variant, keys for the mapping variant.
    pub fn canonical_id(&self, id: &WidgetId) -> WidgetId {
        match (&self.widgets, id) {
            (Widgets::List(_), WidgetId::Key(key)) => key
                .parse::<usize>()
                .map(WidgetId::Index)
                .unwrap_or_else(|_| id.clone()),
            (Widgets::Map(_), WidgetId::Index(index)) => WidgetId::Key(index.to_string()),
            _ => id.clone(),
        }
    }
}

fn parse_record(id: &str, item: Value) -> Result<WidgetRecord, String> {
    let Value::Array(mut parts) = item else {
        return Err(format!("widget `{id}` must be a [type, configuration] array"));
    };
    if parts.is_empty() || parts.len() > 2 {
        return Err(format!(
            "widget `{id}` must have 1 or 2 elements, found {}",
            parts.len()
        ));
    }
    let configuration = if parts.len() == 2 { parts.pop() } else { None };
    let configuration = match configuration {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(format!("widget `{id}` configuration must be an object")),
    };
    let type_index = parts[0]
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| format!("widget `{id}` type must be a non-negative integer"))?;
    Ok(WidgetRecord {
        type_index,
        configuration,
    })
}
