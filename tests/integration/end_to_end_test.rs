//! Whole-pipeline tests over on-disk project fixtures

use autocompat::models::analysis::Outcome;
use autocompat::models::config::Settings;
use autocompat::output::ManifestWriter;
use autocompat::{Engine, NodeVersion, ProjectReport};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), content).unwrap();
}

fn run_in(dir: &Path) -> ProjectReport {
    let settings = Settings {
        scan_path: dir.to_path_buf(),
        ..Settings::default()
    };
    Engine::new(settings).unwrap().run(&mut |_, _, _| {}).unwrap()
}

/// Project fixture: own source uses optional chaining, the single
/// dependency uses an array-prototype method with a later version.
fn fixture_project() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("app");
    write_manifest(
        &root,
        r#"{"name": "app", "version": "0.1.0", "dependencies": {"modern-dep": "1.0.0"}}"#,
    );
    fs::write(root.join("index.js"), "exports.pick = (obj) => obj?.prop;\n").unwrap();

    let dep = root.join("node_modules").join("modern-dep");
    write_manifest(&dep, r#"{"name": "modern-dep", "version": "1.0.0"}"#);
    fs::write(
        dep.join("index.js"),
        "module.exports = (items) => [...items].toSorted();\n",
    )
    .unwrap();

    (dir, root)
}

#[test]
fn recommendation_is_the_maximum_of_both_components() {
    let (_dir, root) = fixture_project();
    let report = run_in(&root);

    assert_eq!(report.source_version, "14.0.0".parse::<NodeVersion>().unwrap());
    assert_eq!(
        report.dependency_version,
        "20.0.0".parse::<NodeVersion>().unwrap()
    );
    assert_eq!(report.recommendation.required.to_string(), "20.0.0");
    assert_eq!(report.recommendation.outcome, Outcome::NeedsUpdate);
    assert_eq!(report.recommendation.constraint(), ">=20.0.0");
}

#[test]
fn rerunning_after_write_back_is_already_optimal() {
    let (_dir, root) = fixture_project();
    let report = run_in(&root);
    assert_eq!(report.recommendation.outcome, Outcome::NeedsUpdate);

    ManifestWriter::apply_constraint(&report.manifest_path, &report.recommendation.constraint())
        .unwrap();

    let report = run_in(&root);
    assert_eq!(report.declared.as_deref(), Some(">=20.0.0"));
    assert_eq!(report.recommendation.outcome, Outcome::AlreadyOptimal);
}

#[test]
fn runs_are_deterministic() {
    let (_dir, root) = fixture_project();
    let first = run_in(&root);
    let second = run_in(&root);

    assert_eq!(first.source_tokens, second.source_tokens);
    assert_eq!(first.dependency_tokens, second.dependency_tokens);
    assert_eq!(first.recommendation.required, second.recommendation.required);
}

#[test]
fn project_without_dependencies_or_detections_yields_zero_baseline() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("bare");
    write_manifest(&root, r#"{"name": "bare"}"#);

    let report = run_in(&root);
    assert_eq!(report.source_version, NodeVersion::ZERO);
    assert_eq!(report.dependency_version, NodeVersion::ZERO);
    assert!(report.packages.is_empty());
}

#[test]
fn unparseable_dependency_files_do_not_poison_the_scan() {
    let (_dir, root) = fixture_project();
    let dep = root.join("node_modules").join("modern-dep");
    fs::write(dep.join("generated.js"), "this is not javascript {{{\n").unwrap();

    let report = run_in(&root);
    // The broken file is skipped with a warning; the good file still
    // contributes its detection.
    assert_eq!(report.dependency_version.to_string(), "20.0.0");
    let dep_report = report
        .packages
        .iter()
        .find(|p| p.name == "modern-dep")
        .unwrap();
    assert_eq!(dep_report.warnings.len(), 1);
}

#[test]
fn shared_dependency_counts_once_per_physical_directory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("app");
    write_manifest(
        &root,
        r#"{"name": "app", "dependencies": {"a": "1.0.0", "b": "1.0.0"}}"#,
    );
    for name in ["a", "b"] {
        let pkg = root.join("node_modules").join(name);
        write_manifest(
            &pkg,
            &format!(r#"{{"name": "{}", "dependencies": {{"shared": "1.0.0"}}}}"#, name),
        );
    }
    let shared = root.join("node_modules").join("shared");
    write_manifest(&shared, r#"{"name": "shared"}"#);
    fs::write(shared.join("index.js"), "[1].at(0);\n").unwrap();

    let report = run_in(&root);
    // Both a and b reach shared, so it is recorded twice, but the reduced
    // version is the same either way and the result stays order-independent.
    let shared_reports: Vec<_> = report
        .packages
        .iter()
        .filter(|p| p.name == "shared")
        .collect();
    assert_eq!(shared_reports.len(), 2);
    for shared_report in shared_reports {
        assert_eq!(shared_report.min_version.to_string(), "16.6.0");
    }
    assert_eq!(report.dependency_version.to_string(), "16.6.0");
}
