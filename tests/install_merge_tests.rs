//! Config merge, backup, and re-run behavior through the real binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
fn replug_cmd() -> Command {
    let mut cmd = Command::cargo_bin("replug").unwrap();
    cmd.env("REPLUG_CACHE_DIR", common::test_cache_dir());
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

fn convert_to_out(plugin: &std::path::Path, target: &str, out: &std::path::Path) -> assert_cmd::assert::Assert {
    replug_cmd()
        .args([
            "convert",
            plugin.to_str().unwrap(),
            "--to",
            target,
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
}

#[test]
fn test_existing_config_values_win_field_by_field() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_full_plugin("demo");
    let out = workspace.path.join("out");

    // User already configured the fetch server and a theme
    workspace.write_file(
        "out/.opencode/opencode.json",
        r#"{"theme": "dark", "mcp": {"fetch": {"note": "mine"}}}"#,
    );

    convert_to_out(&plugin, "opencode", &out).success();

    let config = workspace.read_file("out/.opencode/opencode.json");
    let parsed: serde_json::Value = serde_json::from_str(&config).unwrap();

    // Top-level key only the user has survives untouched
    assert_eq!(parsed["theme"], serde_json::json!("dark"));
    // Within the mergeable key the on-disk entry wins wholesale
    assert_eq!(parsed["mcp"]["fetch"], serde_json::json!({"note": "mine"}));
}

#[test]
fn test_new_servers_are_added_alongside_existing_ones() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_full_plugin("demo");
    let out = workspace.path.join("out");

    workspace.write_file(
        "out/.opencode/opencode.json",
        r#"{"mcp": {"custom": {"type": "remote", "url": "https://example.com"}}}"#,
    );

    convert_to_out(&plugin, "opencode", &out).success();

    let config = workspace.read_file("out/.opencode/opencode.json");
    let parsed: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert_eq!(parsed["mcp"]["custom"]["type"], serde_json::json!("remote"));
    assert_eq!(parsed["mcp"]["fetch"]["type"], serde_json::json!("local"));
}

#[test]
fn test_config_backed_up_before_overwrite() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_full_plugin("demo");
    let out = workspace.path.join("out");

    workspace.write_file("out/.opencode/opencode.json", r#"{"theme": "dark"}"#);

    convert_to_out(&plugin, "opencode", &out)
        .success()
        .stdout(predicate::str::contains("Backed up"));

    let backups = workspace.backups_of("out/.opencode/opencode.json");
    assert_eq!(backups.len(), 1);

    // The backup holds the pre-merge bytes
    let backup = workspace.read_file(&format!("out/.opencode/{}", backups[0]));
    assert_eq!(backup, r#"{"theme": "dark"}"#);
}

#[test]
fn test_malformed_config_falls_back_with_warning_and_backup() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_full_plugin("demo");
    let out = workspace.path.join("out");

    workspace.write_file("out/.opencode/opencode.json", "{not json");

    convert_to_out(&plugin, "opencode", &out)
        .success()
        .stdout(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("not valid JSON"));

    // The replacement parses and carries the plugin's servers
    let config = workspace.read_file("out/.opencode/opencode.json");
    let parsed: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert!(parsed["mcp"]["fetch"].is_object());

    // The malformed original was preserved
    let backups = workspace.backups_of("out/.opencode/opencode.json");
    assert_eq!(backups.len(), 1);
    let backup = workspace.read_file(&format!("out/.opencode/{}", backups[0]));
    assert_eq!(backup, "{not json");
}

#[test]
fn test_valid_json_that_is_not_an_object_also_falls_back() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_full_plugin("demo");
    let out = workspace.path.join("out");

    workspace.write_file("out/.gemini/settings.json", "\"not an object\"");

    convert_to_out(&plugin, "gemini", &out)
        .success()
        .stdout(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("not valid JSON"));

    let settings = workspace.read_file("out/.gemini/settings.json");
    let parsed: serde_json::Value = serde_json::from_str(&settings).unwrap();
    assert!(parsed["mcpServers"]["fetch"].is_object());
}

#[test]
fn test_artifact_overwrite_creates_backup() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_bare_plugin("demo");
    let out = workspace.path.join("out");

    convert_to_out(&plugin, "opencode", &out).success();
    let first = workspace.read_file("out/.opencode/commands/hello.md");

    convert_to_out(&plugin, "opencode", &out)
        .success()
        .stdout(predicate::str::contains("Backed up"));

    let backups = workspace.backups_of("out/.opencode/commands/hello.md");
    assert_eq!(backups.len(), 1);
    let backup = workspace.read_file(&format!("out/.opencode/commands/{}", backups[0]));
    assert_eq!(backup, first);
}

#[test]
fn test_rerun_converges_to_identical_config() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_full_plugin("demo");
    let out = workspace.path.join("out");

    convert_to_out(&plugin, "opencode", &out).success();
    let first = workspace.read_file("out/.opencode/opencode.json");

    convert_to_out(&plugin, "opencode", &out).success();
    let second = workspace.read_file("out/.opencode/opencode.json");

    assert_eq!(first, second);
}

#[test]
fn test_unrelated_existing_files_survive() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_bare_plugin("demo");
    let out = workspace.path.join("out");

    workspace.write_file("out/.opencode/commands/old.md", "An older command\n");
    workspace.write_file("out/.opencode/notes.txt", "keep me\n");

    convert_to_out(&plugin, "opencode", &out).success();

    assert_eq!(
        workspace.read_file("out/.opencode/commands/old.md"),
        "An older command\n"
    );
    assert_eq!(workspace.read_file("out/.opencode/notes.txt"), "keep me\n");
    assert!(workspace.file_exists("out/.opencode/commands/hello.md"));
}

#[test]
fn test_install_defaults_to_home_directory() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_bare_plugin("demo");
    let home = workspace.path.join("home");
    std::fs::create_dir_all(&home).unwrap();

    replug_cmd()
        .env("HOME", &home)
        .args(["install", plugin.to_str().unwrap(), "--to", "cursor"])
        .assert()
        .success();

    assert!(home.join(".cursor/commands/hello.md").is_file());
}

#[test]
fn test_install_opencode_uses_xdg_config_home_layout() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_bare_plugin("demo");
    let home = workspace.path.join("home");
    std::fs::create_dir_all(&home).unwrap();

    replug_cmd()
        .env("HOME", &home)
        .args(["install", plugin.to_str().unwrap(), "--to", "opencode"])
        .assert()
        .success();

    // OpenCode's global config lives under ~/.config/opencode, and the
    // basename rule keeps it from growing a nested .opencode
    assert!(home.join(".config/opencode/commands/hello.md").is_file());
    assert!(!home.join(".config/opencode/.opencode").exists());
}

#[test]
fn test_install_root_overrides_home() {
    let workspace = common::TestWorkspace::new();
    let plugin = workspace.create_bare_plugin("demo");
    let root = workspace.path.join("shared");

    replug_cmd()
        .args([
            "install",
            plugin.to_str().unwrap(),
            "--to",
            "droid",
            "--root",
            root.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(root.join(".factory/commands/hello.md").is_file());
}
