//! Integration tests for the application entry point.
//!
//! Tests the `run_with_args_to` function with various arguments.

#![allow(clippy::unwrap_used)]

use console_cleaner::entry_point::run_with_args_to;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const DIRTY: &str = "console.log('a');\nconsole.info('b');\nconst c = 3;\n";

fn run(args: &[&str]) -> (i32, String) {
    let mut buffer = Vec::new();
    let code = run_with_args_to(args.iter().map(|a| (*a).to_owned()).collect(), &mut buffer)
        .unwrap();
    (code, String::from_utf8(buffer).unwrap())
}

#[test]
fn test_json_report() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.js"), DIRTY).unwrap();
    fs::write(dir.path().join("b.js"), "const clean = 1;\n").unwrap();

    let (code, output) = run(&["--json", dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);

    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["summary"]["files_seen"], 2);
    assert_eq!(json["summary"]["modified"], 1);
    assert_eq!(json["summary"]["calls_removed"], 2);
    assert_eq!(json["dry_run"], false);

    let files = json["files"].as_array().unwrap();
    let modified = files
        .iter()
        .find(|f| f["status"] == "modified")
        .unwrap();
    assert!(modified["path"].as_str().unwrap().ends_with("a.js"));
    assert_eq!(modified["removed"], 2);

    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "\n\nconst c = 3;\n"
    );
}

#[test]
fn test_dry_run_flag() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.js"), DIRTY).unwrap();

    let (code, output) = run(&["--json", "--dry-run", dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);

    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["summary"]["modified"], 1);
    assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), DIRTY);
}

#[test]
fn test_fail_on_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.js"), "const = ;\n").unwrap();
    let path = dir.path().to_str().unwrap();

    let (code, _) = run(&["--quiet", path]);
    assert_eq!(code, 0);

    let (code, output) = run(&["--quiet", "--fail-on-error", path]);
    assert_eq!(code, 1);
    assert!(output.contains("1 failed"));
}

#[test]
fn test_config_discovered_from_root() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".console-cleaner.toml"),
        "[console-cleaner]\nmethods = [\"info\"]\n",
    )
    .unwrap();
    fs::write(dir.path().join("a.js"), DIRTY).unwrap();

    let (code, _) = run(&["--quiet", dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "console.log('a');\n\nconst c = 3;\n"
    );
}

#[test]
fn test_explicit_config_and_flag_override() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[console-cleaner]\nmethods = [\"info\"]\n").unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.js"), DIRTY).unwrap();

    let (code, _) = run(&[
        "--quiet",
        "--config",
        config.to_str().unwrap(),
        "--methods",
        "log",
        src.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(src.join("a.js")).unwrap(),
        "\nconsole.info('b');\nconst c = 3;\n"
    );
}

#[test]
fn test_broken_explicit_config_is_fatal() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[console-cleaner\n").unwrap();

    let result = run_with_args_to(
        vec![
            "--config".to_owned(),
            config.to_string_lossy().into_owned(),
            dir.path().to_string_lossy().into_owned(),
        ],
        &mut Vec::new(),
    );
    assert!(result.is_err());
}

#[test]
fn test_quiet_summary_line() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), DIRTY).unwrap();

    let (code, output) = run(&["-q", dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        output,
        "[SUMMARY] 2 call(s) removed, 1 modified, 0 skipped, 0 failed\n"
    );
}

#[test]
fn test_full_report_lists_modified_files() {
    colored::control::set_override(false);
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.mjs"), DIRTY).unwrap();

    let (code, output) = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(output.contains("app.mjs"));
}

#[test]
fn test_vue_integration_flag() {
    let dir = tempdir().unwrap();
    let component = "<template><p/></template>\n\n<script>\nconsole.log(1);\n</script>\n";
    fs::write(dir.path().join("A.vue"), component).unwrap();
    let path = dir.path().to_str().unwrap();

    let (_, output) = run(&["--json", path]);
    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["files"][0]["status"], "skipped");

    let (_, output) = run(&["--json", "--integration", "vue", path]);
    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["files"][0]["status"], "modified");
    assert_eq!(
        fs::read_to_string(dir.path().join("A.vue")).unwrap(),
        "<template><p/></template>\n\n<script>\n\n</script>\n"
    );
}
