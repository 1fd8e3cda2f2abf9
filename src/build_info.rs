//! Compile-time build metadata for the `--version` surface.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("SSS_GUIS_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("SSS_GUIS_BUILD_TIMESTAMP");

/// Render the CLI version block used by `sss-guis --version`.
pub fn cli_version_text() -> String {
    format!("sss-guis {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}
