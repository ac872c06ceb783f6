//! End-to-end tests for the hilite binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("hilite").unwrap();
    // Keep the user's settings file out of the way
    cmd.env("HOME", "/nonexistent-hilite-home");
    cmd.env("USERPROFILE", "/nonexistent-hilite-home");
    cmd.env_remove("NO_COLOR");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const LOG_RULES: &str = r#"[
    {"pattern": "ERROR", "color": "red"},
    {"pattern": "\\d+", "color": "blue"}
]"#;

#[test]
fn test_highlights_file() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);
    let input = write(&dir, "app.log", "ERROR 42 occurred\nfine\n");

    cli()
        .arg("--color=always")
        .arg(&rules)
        .arg(&input)
        .assert()
        .success()
        .stdout("\x1b[31mERROR\x1b[0m \x1b[34m42\x1b[0m occurred\nfine\n");
}

#[test]
fn test_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.json",
        r#"[{"pattern": "AB", "color": "red"}, {"pattern": "BC", "color": "blue"}]"#,
    );

    cli()
        .args(["--color", "always"])
        .arg(&rules)
        .write_stdin("ABC")
        .assert()
        .success()
        .stdout("\x1b[31mAB\x1b[0mC\n");
}

#[test]
fn test_dash_means_stdin() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);

    cli()
        .arg("--color=never")
        .arg(&rules)
        .arg("-")
        .write_stdin("ERROR 1\r\n")
        .assert()
        .success()
        .stdout("ERROR 1\n");
}

#[test]
fn test_toml_rules_with_nesting() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.toml",
        r#"
[[rule]]
pattern = '\[(\w+)\]'
color = "green"
capture = 1
nested = ["IN"]

[[rule]]
pattern = "IN"
color = "yellow"
"#,
    );

    cli()
        .arg("--color=always")
        .arg(&rules)
        .write_stdin("[INFO]\n")
        .assert()
        .success()
        .stdout("[\x1b[33mIN\x1b[0m\x1b[32mFO\x1b[0m]\n");
}

#[test]
fn test_line_numbers() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);

    cli()
        .args(["-n", "--color=never"])
        .arg(&rules)
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("     1  a\n     2  b\n");
}

#[test]
fn test_no_color_when_piped() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);

    // stdout is a pipe under the test harness, so auto means no color
    cli()
        .arg(&rules)
        .write_stdin("ERROR 42\n")
        .assert()
        .success()
        .stdout("ERROR 42\n");
}

#[test]
fn test_no_color_env_disables_auto() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);

    cli()
        .env("NO_COLOR", "1")
        .arg("--color=auto")
        .arg(&rules)
        .write_stdin("ERROR 42\n")
        .assert()
        .success()
        .stdout("ERROR 42\n");
}

#[test]
fn test_no_color_env_ignored_when_forced() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);

    cli()
        .env("NO_COLOR", "1")
        .arg("--color=always")
        .arg(&rules)
        .write_stdin("ERROR\n")
        .assert()
        .success()
        .stdout("\x1b[31mERROR\x1b[0m\n");
}

#[test]
fn test_settings_file() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);
    let settings = write(&dir, "settings.toml", "line-numbers = true\ncolor = \"always\"\n");

    cli()
        .arg("--config")
        .arg(&settings)
        .arg(&rules)
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout("     1  \x1b[34m7\x1b[0m\n");
}

#[test]
fn test_flag_overrides_settings() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);
    let settings = write(&dir, "settings.toml", "color = \"always\"\n");

    cli()
        .arg("--config")
        .arg(&settings)
        .arg("--color=never")
        .arg(&rules)
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_empty_rules_fail() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", "[]");

    cli()
        .arg(&rules)
        .write_stdin("x\n")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("rule set is empty"));
}

#[test]
fn test_bad_pattern_fails() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.json",
        r#"[{"pattern": "ok", "color": "red"}, {"pattern": "(", "color": "red"}]"#,
    );

    cli()
        .arg(&rules)
        .write_stdin("x\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rule 1").and(predicate::str::contains("'('")));
}

#[test]
fn test_missing_rules_file() {
    cli()
        .arg("/nonexistent/rules.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", LOG_RULES);

    cli()
        .arg(&rules)
        .arg(dir.path().join("missing.log"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn test_missing_rules_argument() {
    cli().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
