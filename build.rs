//! Injects commit and build-time markers for `sss-guis --version`.
//!
//! Either marker can be pinned through the environment for reproducible
//! builds; otherwise git and date are consulted, falling back to "unknown".

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const GIT_HASH_VAR: &str = "SSS_GUIS_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "SSS_GUIS_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed={GIT_HASH_VAR}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_VAR}");

    let git_hash = env::var(GIT_HASH_VAR).ok().or_else(|| {
        capture("git", &["rev-parse", "--short=12", "HEAD"])
    });
    let timestamp = env::var(TIMESTAMP_VAR)
        .ok()
        .or_else(|| capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0);
            format!("unix:{secs}")
        });

    println!(
        "cargo:rustc-env={GIT_HASH_VAR}={}",
        git_hash.as_deref().unwrap_or("unknown")
    );
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

/// Run a command and return its trimmed stdout when it succeeds with output.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
