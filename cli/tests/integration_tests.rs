use std::fs;
use std::path::PathBuf;
use std::process::Output;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("scheme_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_scheme-check"))
        .args(args)
        .output()
        .expect("failed to run scheme-check")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_config(dir: &TempDir, relative: bool, schemes: &[&str]) -> PathBuf {
    let list: Vec<String> = schemes.iter().map(|s| format!("  - {s}")).collect();
    let yaml = format!(
        "version: \"1.0\"\nrelative: {relative}\ncustom_schemes:\n{}\n",
        list.join("\n")
    );
    let path = dir.join("schemes.yml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_known_scheme_succeeds() {
    let out = run(&["check", "HTTPS"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("valid:     true"));
    assert!(text.contains("selected:  https (id 1)"));
}

#[test]
fn check_invalid_scheme_fails() {
    let out = run(&["check", "1bad"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("error: invalid URI scheme"));
}

#[test]
fn check_empty_scheme_depends_on_relative_flag() {
    let out = run(&["check", ""]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("error: scheme not provided"));

    let out = run(&["check", "", "--relative"]);
    assert!(out.status.success());
}

#[test]
fn check_json_output() {
    let out = run(&["check", " ftp ", "--format", "json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["raw_text"], "ftp");
    assert_eq!(json["is_valid"], true);
    assert_eq!(json["selected_id"], 5);
    assert_eq!(json["matched_record"]["value"], "ftp");
}

#[test]
fn check_uses_custom_schemes() {
    let out = run(&["--custom", "git,my_scheme", "check", "MY_SCHEME", "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["selected_value"], "my_scheme");
    assert_eq!(json["selected_id"], 11);
}

#[test]
fn list_yaml_output_includes_custom_flag_schemes() {
    let out = run(&["--custom", "git, ssh", "list", "--format", "yaml"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let yaml: serde_yaml::Value = serde_yaml::from_str(&stdout(&out)).unwrap();
    let records = yaml.as_sequence().unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(records[11]["value"].as_str(), Some("ssh"));
    assert_eq!(records[11]["id"].as_u64(), Some(11));
    assert_eq!(records[11]["builtin"].as_bool(), Some(false));
    assert_eq!(records[0]["builtin"].as_bool(), Some(true));
}

// ---------------------------------------------------------------------------
// parse / select
// ---------------------------------------------------------------------------

#[test]
fn parse_extracts_scheme() {
    let out = run(&["parse", "mailto:ops@example.com", "--format", "json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["raw_text"], "mailto");
    assert_eq!(json["is_relative_reference"], false);
}

#[test]
fn parse_relative_reference_is_valid() {
    let out = run(&["parse", "../index.html"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("relative:  true"));
}

#[test]
fn select_builtin_by_id() {
    let out = run(&["select", "4"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("scheme:    net.tcp"));
}

#[test]
fn select_unknown_id_fails() {
    let out = run(&["select", "77"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("unknown scheme id: 77"));
}

// ---------------------------------------------------------------------------
// list / config
// ---------------------------------------------------------------------------

#[test]
fn list_shows_builtins_in_order() {
    let out = run(&["list", "--format", "json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let values: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["value"].as_str().unwrap())
        .collect();
    assert_eq!(
        values,
        vec![
            "http", "https", "file", "net.pipe", "net.tcp", "ftp", "nntp", "mailto", "news",
            "gopher"
        ]
    );
}

#[test]
fn config_file_registers_schemes_and_relative_flag() {
    let dir = TempDir::new("config_file");
    let config = write_config(&dir, true, &["git", "ssh"]);
    let config = config.to_str().unwrap();

    let out = run(&["--config", config, "list"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("ssh"));

    let out = run(&["--config", config, "check", ""]);
    assert!(out.status.success(), "relative config should accept empty scheme");
}

#[test]
fn config_duplicate_builtin_fails() {
    let dir = TempDir::new("config_duplicate");
    let config = write_config(&dir, false, &["HTTP"]);
    let out = run(&["--config", config.to_str().unwrap(), "list"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("duplicate scheme: http"));
}

#[test]
fn config_file_is_never_written() {
    let dir = TempDir::new("config_readonly");
    let config = write_config(&dir, false, &["git"]);
    let original = fs::read_to_string(&config).unwrap();

    let out = run(&["--config", config.to_str().unwrap(), "--custom", "ssh", "check", "ssh"]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&config).unwrap(), original);

    let out = run(&["--custom", "git", "init", "--output", dir.join("out.yml").to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(!dir.join("out.yml").exists());
}
