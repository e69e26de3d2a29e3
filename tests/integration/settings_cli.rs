//! End-to-end tests for the `settings` binary

use tempfile::TempDir;

use crate::integration::{settings_command, write_file};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn base_file(temp_dir: &TempDir) -> std::path::PathBuf {
    write_file(
        temp_dir.path(),
        "base.toml",
        "retries = 1\n[db]\nhost = \"a\"\nport = 5432\n",
    )
}

#[test]
fn test_show_json_merges_sources() {
    let temp_dir = TempDir::new().unwrap();
    let base = base_file(&temp_dir);
    let ini = write_file(
        temp_dir.path(),
        "override.ini",
        "[globals]\nretries = 4\ndebugMode = True\n",
    );

    let output = settings_command(&temp_dir)
        .args(["show", "--format", "json", "--base"])
        .arg(&base)
        .arg("--file")
        .arg(&ini)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let parsed: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(parsed["retries"], 4);
    assert_eq!(parsed["debugMode"], true);
    assert_eq!(parsed["db"]["host"], "a");
    assert_eq!(parsed["db"]["port"], 5432);
}

#[test]
fn test_get_nested_setting() {
    let temp_dir = TempDir::new().unwrap();
    let base = base_file(&temp_dir);

    let output = settings_command(&temp_dir)
        .args(["get", "db.port", "--base"])
        .arg(&base)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "5432");
}

#[test]
fn test_set_overrides_files() {
    let temp_dir = TempDir::new().unwrap();
    let ini = write_file(temp_dir.path(), "a.ini", "[globals]\nmode = slow\n");

    let output = settings_command(&temp_dir)
        .args(["get", "mode", "--file"])
        .arg(&ini)
        .args(["--set", "mode = fast"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "fast");
}

#[test]
fn test_get_missing_setting_exits_2() {
    let temp_dir = TempDir::new().unwrap();

    let output = settings_command(&temp_dir)
        .args(["get", "absent"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No such setting: absent"));
}

#[test]
fn test_parse_error_exits_3() {
    let temp_dir = TempDir::new().unwrap();
    let ini = write_file(temp_dir.path(), "bad.ini", "[globals\nx = 1\n");

    let output = settings_command(&temp_dir)
        .args(["show", "--file"])
        .arg(&ini)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_missing_section_exits_3() {
    let temp_dir = TempDir::new().unwrap();
    let ini = write_file(temp_dir.path(), "other.ini", "[other]\nx = 1\n");

    let output = settings_command(&temp_dir)
        .args(["show", "--file"])
        .arg(&ini)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_section_flag_selects_section() {
    let temp_dir = TempDir::new().unwrap();
    let ini = write_file(temp_dir.path(), "app.ini", "[app]\nx = 1\n");

    let output = settings_command(&temp_dir)
        .args(["--section", "app", "get", "x", "--file"])
        .arg(&ini)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1");
}

#[test]
fn test_coerce_reports_kind() {
    let temp_dir = TempDir::new().unwrap();

    let cases = [
        ("3", "int\t3"),
        ("-2.5", "float\t-2.5"),
        ("true", "bool\ttrue"),
        ("1+2j", "complex\t1+2j"),
        ("staging", "string\tstaging"),
    ];
    for (token, expected) in cases {
        let output = settings_command(&temp_dir)
            .args(["coerce", token])
            .output()
            .unwrap();
        assert!(output.status.success(), "token {}", token);
        assert_eq!(stdout_of(&output), expected, "token {}", token);
    }
}

#[test]
fn test_show_toml_omits_null_settings() {
    let temp_dir = TempDir::new().unwrap();

    let output = settings_command(&temp_dir)
        .args(["show", "--format", "toml", "--set", "proxy = None", "--set", "port = 1"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_of(&output), "port = 1");
}
