//! Smoke tests to verify command wiring

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MESSY: &str = "\
pages:
- name: Home
  columns:
  - size: full
    widgets:
    - type: rss
      limit: 10
      feeds: [{url: 'https://a.example/rss'}]
";

const FORMATTED: &str = "\
pages:
  -
    name: Home
    columns:
      -
        size: full
        widgets:
          -
            type: rss
            limit: 10
            feeds:
              -
                url: \"https://a.example/rss\"
";

const REFERENCE: &str = r#"{
  "widgets": [
    {"name": "RSS", "type": "rss", "markdown": "Display a list of articles.",
     "example": {"type": "rss", "limit": 10}},
    {"name": "Clock", "type": "clock", "markdown": "Shows the time."}
  ],
  "templates": [
    {"name": "Startpage", "preview_image": null, "requires": "v0.7.0",
     "yaml": "pages:\n  - name: Startpage"}
  ]
}
"#;

/// Command with HOME pointed at an empty directory so no user config leaks in.
fn glancectl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("glancectl").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("GLANCECTL_REFERENCE_DATA")
        .env_remove("RUST_LOG");
    cmd
}

// === Help ===

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("scrape"));
}

#[test]
fn test_fmt_help() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .args(["fmt", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not already formatted"));
}

// === Fmt ===

#[test]
fn test_fmt_prints_canonical_form() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("glance.yml");
    fs::write(&file, MESSY).unwrap();

    glancectl(&home)
        .arg("fmt")
        .arg(&file)
        .assert()
        .success()
        .stdout(FORMATTED);
}

#[test]
fn test_fmt_check() {
    let home = TempDir::new().unwrap();
    let messy = home.path().join("messy.yml");
    let tidy = home.path().join("tidy.yml");
    fs::write(&messy, MESSY).unwrap();
    fs::write(&tidy, FORMATTED).unwrap();

    glancectl(&home)
        .args(["fmt", "--check"])
        .arg(&messy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not formatted"));

    glancectl(&home)
        .args(["fmt", "--check"])
        .arg(&tidy)
        .assert()
        .success();
}

#[test]
fn test_fmt_out_writes_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in.yml");
    let output = home.path().join("out.yml");
    fs::write(&input, MESSY).unwrap();

    glancectl(&home)
        .arg("fmt")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&output).unwrap(), FORMATTED);
}

#[test]
fn test_fmt_rejects_config_without_pages() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("server.yml");
    fs::write(&file, "server:\n  port: 8080\n").unwrap();

    glancectl(&home)
        .arg("fmt")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing pages list"));
}

// === Reference data ===

#[test]
fn test_widgets_list_and_show() {
    let home = TempDir::new().unwrap();
    let reference = home.path().join("reference_data.json");
    fs::write(&reference, REFERENCE).unwrap();

    glancectl(&home)
        .arg("--reference")
        .arg(&reference)
        .arg("widgets")
        .assert()
        .success()
        .stdout(predicate::str::contains("clock"))
        .stdout(predicate::str::contains("RSS"));

    glancectl(&home)
        .arg("--reference")
        .arg(&reference)
        .args(["widgets", "rss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Display a list of articles."))
        .stdout(predicate::str::contains("limit: 10"));

    glancectl(&home)
        .arg("--reference")
        .arg(&reference)
        .args(["widgets", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown widget type: nope"));
}

#[test]
fn test_widgets_json_format() {
    let home = TempDir::new().unwrap();
    let reference = home.path().join("reference_data.json");
    fs::write(&reference, REFERENCE).unwrap();

    glancectl(&home)
        .env("GLANCECTL_REFERENCE_DATA", &reference)
        .args(["widgets", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"clock\""));
}

#[test]
fn test_templates_list_and_print() {
    let home = TempDir::new().unwrap();
    let reference = home.path().join("reference_data.json");
    fs::write(&reference, REFERENCE).unwrap();

    glancectl(&home)
        .arg("--reference")
        .arg(&reference)
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Startpage (requires Glance v0.7.0)"));

    glancectl(&home)
        .arg("--reference")
        .arg(&reference)
        .args(["templates", "Startpage"])
        .assert()
        .success()
        .stdout("pages:\n  - name: Startpage\n");
}

#[test]
fn test_missing_reference_data_is_not_an_error() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .arg("--reference")
        .arg(home.path().join("missing.json"))
        .arg("widgets")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No reference data"));
}

// === Docs ===

#[test]
fn test_docs_prints_quick_reference() {
    let home = TempDir::new().unwrap();
    let docs = home.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(
        docs.join("configuration.md"),
        "### Pages\nA page has columns.\n\n### Properties\n\n### Columns\nsmall or full\n\n## Widgets\n",
    )
    .unwrap();
    fs::write(docs.join("glance.yml"), "pages:\n  - name: Home\n").unwrap();

    glancectl(&home)
        .arg("docs")
        .arg("--docs")
        .arg(&docs)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Pages excerpt ---"))
        .stdout(predicate::str::contains("A page has columns."))
        .stdout(predicate::str::contains("small or full"))
        .stdout(predicate::str::contains("--- Sample glance.yml ---"));
}

#[test]
fn test_docs_without_files_is_not_an_error() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .arg("docs")
        .arg("--docs")
        .arg(home.path().join("missing"))
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No Glance docs found"));
}

// === Scrape ===

#[test]
fn test_scrape_writes_reference_data() {
    let home = TempDir::new().unwrap();
    let docs = home.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(
        docs.join("configuration.md"),
        "## Widgets\n\n### Clock\n- type: clock\n\n### Search\n- type: search\n",
    )
    .unwrap();

    glancectl(&home)
        .arg("scrape")
        .arg("--docs")
        .arg(&docs)
        .assert()
        .success()
        .stdout(predicate::str::contains("with 2 widgets and 0 templates"));

    let written = fs::read_to_string(docs.join("reference_data.json")).unwrap();
    assert!(written.contains("\"type\": \"search\""));
    assert!(written.ends_with('\n'));
}

// === Config ===

#[test]
fn test_config_path_uses_home() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".glancectl"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    glancectl(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join(".glancectl/config.toml").exists());

    glancectl(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    glancectl(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_reports_effective_paths() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".glancectl");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("config.toml"), "default_output = \"dash.yml\"\n").unwrap();

    glancectl(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_output = \"dash.yml\""))
        .stdout(predicate::str::contains("save path:      dash.yml"));
}

// === Misc ===

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glancectl"));
}

#[test]
fn test_edit_requires_terminal() {
    let home = TempDir::new().unwrap();
    glancectl(&home)
        .arg("edit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}
