//! Dependency enumeration against on-disk fixtures

use autocompat::core::crawler::DependencyCrawler;
use autocompat::models::config::Settings;
use autocompat::parsers::package_json::ManifestParser;
use autocompat::utils::manifest_locator::ManifestLocator;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), content).unwrap();
}

fn crawl(root: &Path, settings: &Settings) -> Vec<autocompat::PackageRecord> {
    let locator = ManifestLocator::new();
    let manifest_path = root.join("package.json");
    let manifest = ManifestParser::parse_file(&manifest_path).unwrap();
    DependencyCrawler::new(settings, &locator)
        .crawl(&manifest_path, &manifest)
        .unwrap()
}

#[test]
fn cyclic_graph_terminates_with_a_single_record() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("a");
    write_manifest(
        &root,
        r#"{"name": "a", "version": "1.0.0", "dependencies": {"b": "1.0.0"}}"#,
    );
    write_manifest(
        &root.join("node_modules").join("b"),
        r#"{"name": "b", "version": "2.0.0", "dependencies": {"a": "1.0.0"}}"#,
    );
    write_manifest(
        &root.join("node_modules").join("a"),
        r#"{"name": "a", "version": "1.0.0", "dependencies": {"b": "1.0.0"}}"#,
    );

    let records = crawl(&root, &Settings::default());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "b");
    assert_eq!(records[0].version.as_deref(), Some("2.0.0"));
    assert_eq!(records[0].graph_path, vec!["a", "b"]);
}

#[test]
fn nested_installs_resolve_through_parent_node_modules() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("app");
    write_manifest(
        &root,
        r#"{"name": "app", "dependencies": {"direct": "1.0.0"}}"#,
    );
    // direct has its own nested install of its dependency.
    let direct = root.join("node_modules").join("direct");
    write_manifest(
        &direct,
        r#"{"name": "direct", "dependencies": {"nested": "1.0.0"}}"#,
    );
    write_manifest(
        &direct.join("node_modules").join("nested"),
        r#"{"name": "nested"}"#,
    );

    let records = crawl(&root, &Settings::default());
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["direct", "nested"]);
}

#[test]
fn crawl_cap_stops_enumeration() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("app");
    write_manifest(
        &root,
        r#"{"name": "app", "dependencies": {"d1": "1", "d2": "1", "d3": "1", "d4": "1"}}"#,
    );
    for name in ["d1", "d2", "d3", "d4"] {
        write_manifest(
            &root.join("node_modules").join(name),
            &format!(r#"{{"name": "{}"}}"#, name),
        );
    }

    let settings = Settings {
        limit: Some(3),
        ..Settings::default()
    };
    assert_eq!(crawl(&root, &settings).len(), 3);
}
