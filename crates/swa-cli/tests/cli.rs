//! End-to-end tests for the `swa-adapter` binary.

// assert_cmd::Command::cargo_bin is deprecated but still works
#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn swa_adapter() -> Command {
    let mut cmd = Command::cargo_bin("swa-adapter").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn help_lists_commands() {
    swa_adapter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("emulate"))
        .stdout(predicate::str::contains("sources"));
}

#[test]
fn config_prints_generated_routes() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "swa-adapter.toml",
        "[customStaticWebAppConfig]\nroutes = [{ route = \"/login\", redirect = \"/.auth/login/github\" }]\n",
    );

    let output = swa_adapter()
        .args(["config", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let routes: Vec<_> = config["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["route"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(routes, ["/login", "/api/*", "/data-api/*", "*", "/_app/immutable/*"]);
    assert_eq!(config["navigationFallback"]["rewrite"], "/api/sk_render");
    assert_eq!(config["platform"]["apiRuntime"], "node:20");
}

#[test]
fn config_rejects_navigation_fallback() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "swa-adapter.config.json",
        r#"{ "customStaticWebAppConfig": { "navigationFallback": { "rewrite": "/index.html" } } }"#,
    );

    swa_adapter()
        .args(["config", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot override navigationFallback"));
}

#[test]
fn emulate_authenticated_prints_dev_user() {
    let temp = TempDir::new().unwrap();

    swa_adapter()
        .args(["emulate", "--role", "authenticated", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"userId\": \"devUser\""))
        .stdout(predicate::str::contains("\"functionName\": \"sk_render\""));
}

#[test]
fn emulate_defaults_to_anonymous() {
    let temp = TempDir::new().unwrap();

    let output = swa_adapter()
        .args(["emulate", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let platform: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(platform["clientPrincipal"].is_null());
    assert!(platform["user"].is_null());
}

#[test]
fn sources_rewrites_through_maps() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "server/nodes/0.js.map",
        r#"{ "version": 3, "sources": ["../../src/routes/+page.svelte"], "mappings": "" }"#,
    );

    swa_adapter()
        .current_dir(temp.path())
        .args(["sources", "--dir", "server", "--prefix", "web"])
        .args(["../../src/routes/+page.svelte", "unknown.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "../../src/routes/+page.svelte -> web/src/routes/+page.svelte",
        ))
        .stdout(predicate::str::contains("unknown.js -> unknown.js"));
}

#[test]
fn build_fails_on_reserved_api_routes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/routes/+page.svelte", "");
    write(temp.path(), "src/routes/api/blog/+server.js", "");
    write(temp.path(), "esbuild", "");

    swa_adapter()
        .args(["build", "--root"])
        .arg(temp.path())
        .args(["--esbuild", "esbuild"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("/api/blog"));
}

#[test]
fn build_reports_missing_esbuild() {
    let temp = TempDir::new().unwrap();

    swa_adapter()
        .args(["build", "--esbuild", "no-such-esbuild", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("esbuild executable not found"));
}
