//! CLI entry point for sss-guis.

mod build_info;
mod cli;

use clap::Parser;
use sss_guis::bootstrap::{Bootstrap, Page};
use sss_guis::config::load_gui_config;
use sss_guis::error::GuiError;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SSS_GUIS_LOG";

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    if args.version {
        println!("{}", build_info::cli_version_text());
        return;
    }

    init_tracing(args.verbose);

    if let Err(e) = run(&args).await {
        eprintln!("sss-guis: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sss_guis=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: &cli::Args) -> Result<(), GuiError> {
    let mut loaded = load_gui_config(args.config.as_deref())?;
    if let Some(base_dir) = &args.base_dir {
        loaded.base_dir = base_dir.clone();
    }
    tracing::debug!(source = ?loaded.source, base_dir = %loaded.base_dir.display(), "configuration loaded");

    let bootstrap = Bootstrap::from_loaded(loaded)?;
    match bootstrap.run().await {
        Ok(page) => emit(&page.to_html(bootstrap.cache()), args.output.as_deref()),
        Err(err) => {
            if let Some(output) = args.output.as_deref() {
                let page = Page::error(&err);
                if let Err(write_err) = emit(&page.to_html(bootstrap.cache()), Some(output)) {
                    tracing::warn!(error = %write_err, "failed to write error page");
                }
            }
            Err(err)
        }
    }
}

fn emit(html: &str, output: Option<&Path>) -> Result<(), GuiError> {
    match output {
        Some(path) => {
            std::fs::write(path, html).map_err(|e| GuiError::Output {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            tracing::info!(path = %path.display(), bytes = html.len(), "page written");
            Ok(())
        }
        None => {
            print!("{html}");
            Ok(())
        }
    }
}
