//! Source map locator against checked-in fixtures and temporary trees.

use std::fs;
use std::path::Path;

use swa_adapter::{LocatorState, SourceMapLocator};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn rewrites_relative_to_the_map_directory() {
    let locator = SourceMapLocator::new(["./tests/fixtures/sourcemaps"]);

    assert_eq!(
        locator.rewrite("../../.svelte-kit/output/server/nodes/1.js"),
        "tests/fixtures/.svelte-kit/output/server/nodes/1.js"
    );
    assert_eq!(locator.rewrite("whatever"), "whatever");
}

#[test]
fn prefix_is_prepended() {
    let locator = SourceMapLocator::new(["./tests/fixtures/sourcemaps"]).with_prefix("web");

    assert_eq!(
        locator.rewrite("../../.svelte-kit/output/server/nodes/1.js"),
        "web/tests/fixtures/.svelte-kit/output/server/nodes/1.js"
    );
}

#[test]
fn sources_resolve_to_their_own_directory() {
    let d1 = TempDir::new().unwrap();
    let d2 = TempDir::new().unwrap();
    write(&d1.path().join("x.js.map"), r#"{"sources":["a.ts"]}"#);
    write(&d2.path().join("y.js.map"), r#"{"sources":["b.ts"]}"#);

    let locator = SourceMapLocator::new([d1.path(), d2.path()]);
    let a = locator.rewrite("a.ts");
    let b = locator.rewrite("b.ts");

    let slash = |p: &Path| p.to_string_lossy().replace('\\', "/");
    assert_eq!(a, format!("{}/a.ts", slash(d1.path())));
    assert_eq!(b, format!("{}/b.ts", slash(d2.path())));
}

#[test]
fn later_directory_wins_a_collision() {
    let d1 = TempDir::new().unwrap();
    let d2 = TempDir::new().unwrap();
    write(&d1.path().join("x.js.map"), r#"{"sources":["shared.ts"]}"#);
    write(&d2.path().join("y.js.map"), r#"{"sources":["shared.ts"]}"#);

    let locator = SourceMapLocator::new([d1.path(), d2.path()]);
    let resolved = locator.rewrite("shared.ts");

    assert!(resolved.starts_with(&d2.path().to_string_lossy().replace('\\', "/")));
    assert_eq!(locator.index().collisions(), 1);
}

#[test]
fn non_string_entries_do_not_drop_the_map() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("x.js.map"), r#"{"sources":["a.ts",null,42,{"x":1},"b.ts"]}"#);

    let locator = SourceMapLocator::new([dir.path()]);
    let slash = dir.path().to_string_lossy().replace('\\', "/");

    assert_eq!(locator.rewrite("a.ts"), format!("{slash}/a.ts"));
    assert_eq!(locator.rewrite("b.ts"), format!("{slash}/b.ts"));
    assert_eq!(locator.index().map_count(), 1);
    assert_eq!(locator.index().source_count(), 2);
}

#[test]
fn scans_once_across_rewrites() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("x.js.map"), r#"{"sources":["a.ts"]}"#);
    let locator = SourceMapLocator::new([dir.path()]);

    assert_eq!(locator.state(), LocatorState::Unindexed);
    locator.rewrite("a.ts");
    // maps added after the scan are not picked up
    write(&dir.path().join("late.js.map"), r#"{"sources":["late.ts"]}"#);
    locator.rewrite("a.ts");

    assert_eq!(locator.scan_count(), 1);
    assert_eq!(locator.state(), LocatorState::Indexed);
    assert_eq!(locator.rewrite("late.ts"), "late.ts");
}

#[test]
fn missing_directories_index_nothing() {
    let locator = SourceMapLocator::new(["./tests/fixtures/does-not-exist"]);
    assert_eq!(locator.rewrite("a.ts"), "a.ts");
    assert_eq!(locator.index().map_count(), 0);
}
