//! Runs the built `sss-guis` binary against sites on disk.

mod support;

use scraper::{Html, Selector};
use serde_json::json;
use std::process::Command;
use support::{structure, TempSite};

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sss-guis"));
    command.env_remove("SSS_GUIS_LOG");
    command
}

fn write_site(site: &TempSite, types: &[&str], widgets: serde_json::Value) {
    site.write(
        "gui.toml",
        "name = \"Disk\"\nstructure = \"structure.json\"\nstylesheet = \"css/site.css\"\n",
    );
    site.write(
        "structure.json",
        &structure(types, widgets, json!(0)).to_string(),
    );
    site.write("css/site.css", "body { color: black }");
}

#[test]
fn renders_configured_site_to_output_file() {
    let site = TempSite::new("cli-ok");
    write_site(&site, &["banner"], json!([[0, {"text": "From disk"}]]));
    let output = site.path().join("out.html");

    let status = binary()
        .arg(site.path().join("gui.toml"))
        .arg("-o")
        .arg(&output)
        .status()
        .expect("run sss-guis");
    assert!(status.success());

    let html = std::fs::read_to_string(&output).expect("output written");
    let doc = Html::parse_document(&html);
    let title = Selector::parse("title").expect("selector");
    let banner = Selector::parse("h2.banner").expect("selector");
    assert_eq!(
        doc.select(&title).next().map(|t| t.text().collect::<String>()),
        Some("Disk | SSS".to_string())
    );
    assert_eq!(
        doc.select(&banner).next().map(|b| b.text().collect::<String>()),
        Some("From disk".to_string())
    );
    assert!(html.contains("body { color: black }"));
}

#[test]
fn failure_exits_nonzero_and_writes_error_page() {
    let site = TempSite::new("cli-err");
    write_site(&site, &["chart"], json!([[0, {}]]));
    let output = site.path().join("out.html");

    let result = binary()
        .arg(site.path().join("gui.toml"))
        .arg("--output")
        .arg(&output)
        .output()
        .expect("run sss-guis");
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("sss-guis: structure:"), "stderr: {stderr}");
    assert!(stderr.contains("chart"), "stderr: {stderr}");

    let html = std::fs::read_to_string(&output).expect("error page written");
    assert!(html.contains("<title>Error | SSS</title>"));
}

#[test]
fn unwritable_error_page_is_reported() {
    let site = TempSite::new("cli-unwritable");
    write_site(&site, &["chart"], json!([[0, {}]]));
    let output = site.path().join("no-such-dir").join("out.html");

    let result = binary()
        .arg(site.path().join("gui.toml"))
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run sss-guis");
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed to write error page"), "stderr: {stderr}");
    assert!(stderr.contains("sss-guis: structure:"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn base_dir_overrides_config_location() {
    let site = TempSite::new("cli-base");
    write_site(&site, &["text"], json!([[0, {"text": "relocated"}]]));
    let config_only = TempSite::new("cli-config");
    let config = config_only.write(
        "gui.toml",
        "name = \"Moved\"\nstructure = \"structure.json\"\nstylesheet = \"css/site.css\"\n",
    );

    let result = binary()
        .arg(&config)
        .arg("--base-dir")
        .arg(site.path())
        .output()
        .expect("run sss-guis");
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains(">relocated</span>"), "stdout: {stdout}");
}

#[test]
fn missing_config_is_reported() {
    let site = TempSite::new("cli-missing");
    let result = binary()
        .arg(site.path().join("nope.toml"))
        .output()
        .expect("run sss-guis");
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).starts_with("sss-guis: settings:"));
}

#[test]
fn version_prints_build_metadata() {
    let result = binary().arg("--version").output().expect("run sss-guis");
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.starts_with("sss-guis "));
    assert!(stdout.contains("commit:"));
}
