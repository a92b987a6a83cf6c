//! Integration tests for traversal and rewriting.
//!
//! These tests drive `ConsoleCleaner` over real directory trees and verify:
//! - Recursion into nested directories and ignore-policy pruning
//! - Clean files are never rewritten
//! - Dry runs never write
//! - A failing file does not stop its siblings

#![allow(clippy::unwrap_used)]

use console_cleaner::cleaner::{ConsoleCleaner, FileStatus};
use console_cleaner::dialect::Transformer;
use console_cleaner::engine::{ConsoleMethodSet, ExcisionOptions};
use console_cleaner::policy::{IgnorePolicy, MatchPolicy};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const DIRTY: &str = "const a = 1;\nconsole.log(a);\nexport default a;\n";
const CLEANED: &str = "const a = 1;\n\nexport default a;\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_nested_directories_are_cleaned() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", DIRTY);
    write(root, "src/b.ts", DIRTY);
    write(root, "src/deep/er/c.mjs", DIRTY);

    let result = ConsoleCleaner::default().process_directory(root);

    assert_eq!(result.summary.modified, 3);
    assert_eq!(result.summary.calls_removed, 3);
    for rel in ["a.js", "src/b.ts", "src/deep/er/c.mjs"] {
        assert_eq!(read(root, rel), CLEANED, "{rel}");
    }
}

#[test]
fn test_ignored_directories_survive() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "node_modules/pkg/index.js", DIRTY);
    write(root, "dist/bundle.js", DIRTY);
    write(root, "src/app.js", DIRTY);

    let result = ConsoleCleaner::default().process_directory(root);

    assert_eq!(result.summary.files_seen, 1);
    assert_eq!(read(root, "node_modules/pkg/index.js"), DIRTY);
    assert_eq!(read(root, "dist/bundle.js"), DIRTY);
    assert_eq!(read(root, "src/app.js"), CLEANED);
}

#[test]
fn test_custom_ignore_and_match() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "fixtures/sample.js", DIRTY);
    write(root, "src/app.js", DIRTY);
    write(root, "src/app.ts", DIRTY);

    let result = ConsoleCleaner::default()
        .with_ignore(IgnorePolicy::new(["fixtures"]))
        .with_matcher(MatchPolicy::new([".ts"]))
        .process_directory(root);

    assert_eq!(result.summary.modified, 1);
    assert_eq!(read(root, "fixtures/sample.js"), DIRTY);
    assert_eq!(read(root, "src/app.js"), DIRTY);
    assert_eq!(read(root, "src/app.ts"), CLEANED);
}

#[test]
fn test_clean_file_not_rewritten() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let source = "export const x = (console.log('kept'), 1);\n";
    write(root, "clean.js", source);
    let before = fs::metadata(root.join("clean.js")).unwrap().modified().unwrap();

    std::thread::sleep(Duration::from_millis(20));
    let result = ConsoleCleaner::default().process_directory(root);

    assert_eq!(result.summary.unchanged, 1);
    assert_eq!(result.files[0].status, FileStatus::Unchanged);
    let after = fs::metadata(root.join("clean.js")).unwrap().modified().unwrap();
    assert_eq!(before, after);
    assert_eq!(read(root, "clean.js"), source);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", DIRTY);
    write(root, "b.astro", "---\nconsole.log(1);\n---\n<p/>\n");

    let result = ConsoleCleaner::default()
        .with_dry_run(true)
        .process_directory(root);

    assert!(result.dry_run);
    assert_eq!(result.summary.modified, 2);
    assert_eq!(read(root, "a.js"), DIRTY);
    assert_eq!(read(root, "b.astro"), "---\nconsole.log(1);\n---\n<p/>\n");
}

#[test]
fn test_parse_failure_does_not_stop_siblings() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let broken = "console.log(1);\nconst = ;\n";
    write(root, "broken.js", broken);
    write(root, "ok.js", DIRTY);

    let result = ConsoleCleaner::default().process_directory(root);

    assert_eq!(result.summary.failed, 1);
    assert_eq!(result.summary.modified, 1);
    assert!(result.has_failures());
    assert_eq!(read(root, "broken.js"), broken);
    assert_eq!(read(root, "ok.js"), CLEANED);
}

#[test]
fn test_second_run_is_noop() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "a.ts",
        "if (x) console.log(x);\nfor (;;) { console.warn(1); break; }\nconst y = () => console.info(2);\n",
    );

    let first = ConsoleCleaner::default().process_directory(root);
    assert_eq!(first.summary.modified, 1);
    let once = read(root, "a.ts");

    let second = ConsoleCleaner::default().process_directory(root);
    assert_eq!(second.summary.unchanged, 1);
    assert_eq!(read(root, "a.ts"), once);
}

#[test]
fn test_narrower_method_set_removes_fewer() {
    let source = "console.log(1);\nconsole.error(2);\nconsole.table(3);\n";
    let count = |methods: ConsoleMethodSet| {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.js", source);
        let transformer = Transformer::new(ExcisionOptions {
            methods,
            ..ExcisionOptions::default()
        });
        ConsoleCleaner::new(transformer)
            .process_directory(dir.path())
            .summary
            .calls_removed
    };

    let all = count(ConsoleMethodSet::all());
    let default = count(ConsoleMethodSet::default());
    let narrow = count(ConsoleMethodSet::new(["error"]));
    let none = count(ConsoleMethodSet::new(Vec::<String>::new()));

    assert_eq!((all, default, narrow, none), (3, 2, 1, 0));
}

#[test]
fn test_multiple_roots_and_file_roots() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "one/a.js", DIRTY);
    write(root, "two/b.js", DIRTY);
    write(root, "three/c.js", DIRTY);

    let result = ConsoleCleaner::default().process_paths(&[
        root.join("one"),
        root.join("two/b.js"),
        root.join("two"),
    ]);

    assert_eq!(result.summary.files_seen, 2);
    assert_eq!(read(root, "three/c.js"), DIRTY);
}
