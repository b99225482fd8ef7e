/// Integration tests for the scan-and-write pipeline against real
/// directory trees.
use repo_sbom::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn add_repo(root: &Path, name: &str, manifest_name: &str, content: &str) {
    let repo = root.join(name);
    fs::create_dir(&repo).unwrap();
    fs::write(repo.join(manifest_name), content).unwrap();
}

#[test]
fn test_scan_mixed_root_end_to_end() {
    let root = TempDir::new().unwrap();
    add_repo(
        root.path(),
        "pkgA",
        "package.json",
        r#"{"name": "pkgA", "version": "1.0.0", "dependencies": {"express": "^4.18.2"}}"#,
    );
    add_repo(
        root.path(),
        "pkgB",
        "requirements.txt",
        "flask==2.0.1\nrequests>=2.28\n",
    );
    add_repo(
        root.path(),
        "pkgC",
        "package-lock.json",
        r#"{"name": "pkgC", "version": "2.0.0", "lockfileVersion": 3}"#,
    );
    fs::create_dir(root.path().join("empty-repo")).unwrap();

    let report = repo_sbom::scan::run(root.path()).unwrap();
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.skipped.len(), 1);

    // CSV: one header plus one row per record, in record order.
    let csv = fs::read_to_string(root.path().join("sbom.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "name,version,type,path,description,license,author,engines,dependencies,lockfileVersion"
    );

    // JSON round-trips to the in-memory record set.
    let json = fs::read_to_string(root.path().join("sbom.json")).unwrap();
    let records: Vec<SbomRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records, report.records);

    let npm_record = records.iter().find(|r| r.name == "pkgA").unwrap();
    assert_eq!(npm_record.version, "1.0.0");
    assert_eq!(npm_record.manifest_type, ManifestType::Npm { engine: None });
    assert!(npm_record.path.ends_with("pkgA/package.json"));
    assert!(npm_record.path.is_absolute());

    let pip_record = records
        .iter()
        .find(|r| r.manifest_type == ManifestType::Pip)
        .unwrap();
    assert_eq!(pip_record.version, "");
    assert!(pip_record.name.ends_with("pkgB"));
    assert_eq!(
        pip_record.dependencies,
        Some(Dependencies::Lines(vec![
            "flask==2.0.1".to_string(),
            "requests>=2.28".to_string(),
        ]))
    );

    let lock_record = records.iter().find(|r| r.name == "pkgC").unwrap();
    assert_eq!(lock_record.lockfile_version, Some(3));
}

#[test]
fn test_empty_root_produces_empty_outputs() {
    let root = TempDir::new().unwrap();
    let report = repo_sbom::scan::run(root.path()).unwrap();
    assert!(report.records.is_empty());

    let csv = fs::read_to_string(root.path().join("sbom.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("name,version,type,path"));

    let json = fs::read_to_string(root.path().join("sbom.json")).unwrap();
    let records: Vec<SbomRecord> = serde_json::from_str(&json).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_manifest_priority_first_match_wins() {
    let root = TempDir::new().unwrap();
    let repo = root.path().join("multi");
    fs::create_dir(&repo).unwrap();
    fs::write(repo.join("requirements.txt"), "flask==2.0.1\n").unwrap();
    fs::write(
        repo.join("package.json"),
        r#"{"name": "multi", "version": "1.0.0"}"#,
    )
    .unwrap();
    fs::write(
        repo.join("package-lock.json"),
        r#"{"name": "multi", "version": "1.0.0", "lockfileVersion": 2}"#,
    )
    .unwrap();

    let report = scan(root.path()).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].manifest_type, ManifestType::Pip);
    assert!(report.records[0].path.ends_with("requirements.txt"));
}

#[test]
fn test_parse_failure_aborts_before_writing_outputs() {
    let root = TempDir::new().unwrap();
    add_repo(root.path(), "broken", "package.json", "{ not valid json");

    let result = repo_sbom::scan::run(root.path());
    assert!(result.is_err());
    assert!(!root.path().join("sbom.csv").exists());
    assert!(!root.path().join("sbom.json").exists());
}

#[test]
fn test_engines_npm_suffixes_type() {
    let root = TempDir::new().unwrap();
    add_repo(
        root.path(),
        "engined",
        "package.json",
        r#"{"name": "engined", "version": "3.0.0", "engines": {"node": ">=18", "npm": ">=9"}}"#,
    );

    let report = scan(root.path()).unwrap();
    let record = &report.records[0];
    assert_eq!(record.manifest_type.to_string(), "npm: >=9");

    let json = to_json(&report.records).unwrap();
    assert!(json.contains("\"type\": \"npm: >=9\""));
}
