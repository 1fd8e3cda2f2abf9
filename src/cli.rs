//! CLI argument parsing via clap.

use clap::Parser;
use std::path::PathBuf;

/// Render a declarative widget GUI into a standalone HTML page.
#[derive(Debug, Parser)]
#[command(name = "sss-guis", disable_version_flag = true)]
pub struct Args {
    /// GUI configuration file (default: ./gui.toml, then ./gui.json).
    pub config: Option<String>,

    /// Write the page here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Resolve relative asset URLs against this directory instead of the
    /// configuration file's directory.
    #[arg(long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Log at debug level (overridden by SSS_GUIS_LOG).
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Print version and build metadata.
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}
