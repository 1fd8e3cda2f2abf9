//! GUI bootstrap configuration loading from TOML or JSON files.
//!
//! The configuration names the GUI and points at its structure document,
//! stylesheet, and optional modules:
//!
//! ```toml
//! name = "Dashboard"
//! structure = "structure.json"
//! stylesheet = "style.css"
//! modules = ["widgets.js"]
//!
//! [fetch]
//! timeout_secs = 30
//! ```

mod defaults;
mod loader;
mod sources;
mod types;

pub use defaults::DEFAULT_MAX_DEPTH;
pub use loader::load_gui_config;
pub use types::{ConfigSource, FetchConfig, GuiConfig, LoadedGuiConfig};
