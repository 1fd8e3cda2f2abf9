//! Default configuration constants.
//!
//! Shared by the serde defaults in `types` and by tests so literals are not
//! duplicated.

/// Local configuration file names probed when no explicit path is given.
pub(super) const LOCAL_TOML_CONFIG: &str = "gui.toml";
pub(super) const LOCAL_JSON_CONFIG: &str = "gui.json";
/// Default timeout for one asset or structure request.
pub(super) const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// Default total attempts per HTTP request, including the first.
pub(super) const DEFAULT_FETCH_MAX_ATTEMPTS: u32 = 3;
/// Deepest widget nesting allowed during structure resolution.
pub const DEFAULT_MAX_DEPTH: usize = 64;

pub(super) fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
