//! Error taxonomy for structure resolution, rendering, resources, and dialogs.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A widget configuration field is missing or invalid.
///
/// Always attributable to one widget type and one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub widget: String,
    pub field: String,
    pub reason: String,
}

impl ConfigError {
    pub fn new(widget: impl Into<String>, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            widget: widget.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} widget: `{}` {}", self.widget, self.field, self.reason)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// StructureError
// ---------------------------------------------------------------------------

/// Errors from widget declaration and structure document handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A widget type name was declared twice.
    DuplicateType(String),
    /// The structure references a type with no factory (or an out-of-range index).
    UnknownType(String),
    /// No widget record exists for an identifier.
    MissingWidget(String),
    /// A widget was requested before any structure document was loaded.
    NotLoaded,
    /// The structure document could not be fetched.
    DocumentFetch { url: String, reason: String },
    /// The structure document body is not a valid structure.
    DocumentParse { url: String, reason: String },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateType(name) => {
                write!(f, "a widget named \"{name}\" has already been declared")
            }
            Self::UnknownType(name) => {
                write!(f, "unable to create widget of \"{name}\" which is an unknown widget type")
            }
            Self::MissingWidget(id) => write!(f, "no widget exists for reference `{id}`"),
            Self::NotLoaded => write!(f, "no structure has been loaded"),
            Self::DocumentFetch { url, reason } => {
                write!(f, "failed to get structure `{url}`: {reason}")
            }
            Self::DocumentParse { url, reason } => {
                write!(f, "failed to parse a valid JSON structure from `{url}`: {reason}")
            }
        }
    }
}

impl std::error::Error for StructureError {}

// ---------------------------------------------------------------------------
// ResourceError
// ---------------------------------------------------------------------------

/// Errors from fetched assets.
///
/// Cloneable so one failed fetch can be reported to every waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Network error or non-success status while fetching a resource.
    Fetch { url: String, reason: String },
    /// A module failed to load while the loader was converging.
    ModuleLoad { url: String, reason: String },
    /// The content kind cannot be decoded by the media surface.
    UnsupportedMedia { widget: String, content_kind: String },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch { url, reason } => write!(f, "failed to load resource `{url}`: {reason}"),
            Self::ModuleLoad { url, reason } => write!(f, "failed to load module `{url}`: {reason}"),
            Self::UnsupportedMedia {
                widget,
                content_kind,
            } => write!(
                f,
                "{widget} resource of type \"{content_kind}\" is not supported"
            ),
        }
    }
}

impl std::error::Error for ResourceError {}

// ---------------------------------------------------------------------------
// FetchError
// ---------------------------------------------------------------------------

/// Transport-level errors from a [`crate::fetch::Fetcher`].
#[derive(Debug)]
pub enum FetchError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status.
    Status(u16),
    /// Local file read failure.
    Io(std::io::Error),
    /// URL scheme the transport cannot serve.
    UnsupportedScheme(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::UnsupportedScheme(scheme) => write!(f, "unsupported scheme `{scheme}`"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// SettingsError
// ---------------------------------------------------------------------------

/// Errors when loading the GUI bootstrap configuration.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
            Self::Invalid(msg) => write!(f, "invalid gui configuration: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ---------------------------------------------------------------------------
// DialogError
// ---------------------------------------------------------------------------

/// Errors from the dialog arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The action set is empty, has a blank label, or repeats a label.
    InvalidActions(String),
    /// A newer dialog replaced this one before a choice was made.
    Superseded,
    /// The dialog closed without an action being chosen.
    Dismissed,
    /// No frontend is listening for dialog requests.
    Unavailable,
    /// A frontend answered with a label outside the action set.
    UnknownAction(String),
}

impl fmt::Display for DialogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidActions(msg) => write!(f, "invalid dialog actions: {msg}"),
            Self::Superseded => write!(f, "dialog was superseded by a newer dialog"),
            Self::Dismissed => write!(f, "dialog was closed without an action"),
            Self::Unavailable => write!(f, "dialog frontend is unavailable"),
            Self::UnknownAction(label) => write!(f, "\"{label}\" is not an action of this dialog"),
        }
    }
}

impl std::error::Error for DialogError {}

// ---------------------------------------------------------------------------
// GuiError
// ---------------------------------------------------------------------------

/// Top-level error for resolving, rendering, and bootstrapping a GUI.
#[derive(Debug)]
pub enum GuiError {
    Config(ConfigError),
    Structure(StructureError),
    Resource(ResourceError),
    Settings(SettingsError),
    /// A layout received more items than it has grid slots.
    Capacity { capacity: usize, requested: usize },
    /// A structure references itself directly or through descendants.
    RecursiveStructure { identifier: String, chain: Vec<String> },
    /// The rendered page could not be written.
    Output { path: String, reason: String },
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Structure(e) => write!(f, "structure: {e}"),
            Self::Resource(e) => write!(f, "resource: {e}"),
            Self::Settings(e) => write!(f, "settings: {e}"),
            Self::Capacity {
                capacity,
                requested,
            } => write!(
                f,
                "attempting to add {requested} items to a layout with {capacity} slots (consider increasing `columns` or `rows`)"
            ),
            Self::Output { path, reason } => write!(f, "output: failed to write `{path}`: {reason}"),
            Self::RecursiveStructure { identifier, chain } => {
                if chain.is_empty() {
                    write!(f, "structure is too deeply nested at `{identifier}`")
                } else {
                    write!(
                        f,
                        "recursive structure: `{identifier}` references itself through {}",
                        chain.join(" -> ")
                    )
                }
            }
        }
    }
}

impl std::error::Error for GuiError {}

impl From<ConfigError> for GuiError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StructureError> for GuiError {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}

impl From<ResourceError> for GuiError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

impl From<SettingsError> for GuiError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}
