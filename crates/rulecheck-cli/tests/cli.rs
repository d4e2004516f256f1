//! Integration tests for the rulecheck commands
//!
//! Tests run the validate and rules commands against fixture files in a
//! temporary directory and inspect the rendered output and exit codes.
//! The last group runs the built binary to check process exit codes.

use clap::Parser;
use rulecheck_cli::cli::commands::{execute_rules, execute_validate, ValidateRequest};
use rulecheck_cli::{CliError, ExitCode, OutputFormat, RuleCheckCli};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const RULES: &str = r#"
mandatory:
  - name
  - owner
dependency:
  enabled:
    mandatory:
      - endpoint
type:
  port: integer
  name: string
length:
  code: [3]
"#;

/// Helper to lay out a rules file and a data directory
fn fixture(files: &[(&str, &str)]) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("rules.yaml");
    fs::write(&rules, RULES).unwrap();

    let data = dir.path().join("yaml_files");
    fs::create_dir_all(&data).unwrap();
    for (name, content) in files {
        let path = data.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    (dir, rules, data)
}

fn request(rules: &Path, paths: Vec<PathBuf>, format: OutputFormat) -> ValidateRequest {
    ValidateRequest {
        rules: rules.to_path_buf(),
        paths,
        format,
        extensions: vec!["yaml".to_string(), "yml".to_string()],
        search_dirs: Vec::new(),
    }
}

fn run(request: &ValidateRequest) -> (ExitCode, String) {
    colored::control::set_override(false);
    let mut out = Vec::new();
    let code = execute_validate(request, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_clean_data_succeeds() {
    let (_dir, rules, data) = fixture(&[(
        "app.yaml",
        "- name: web\n  owner: ops\n  enabled: true\n  endpoint: /health\n  port: 8080\n  code: abc\n",
    )]);

    let (code, text) = run(&request(&rules, vec![data], OutputFormat::Plain));
    assert_eq!(code, ExitCode::Success);
    assert_eq!(text, "Validation successful!\n");
}

#[test]
fn test_violations_fail_with_messages() {
    let (_dir, rules, data) = fixture(&[(
        "app.yaml",
        "- name: web\n  enabled: true\n  port: \"8080\"\n  code: abcd\n",
    )]);
    let file = data.join("app.yaml").display().to_string();

    let (code, text) = run(&request(&rules, vec![data], OutputFormat::Plain));
    assert_eq!(code, ExitCode::ValidationError);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        format!("In the file {file}, the key owner is not present for the entry web.")
    );
    assert_eq!(
        lines[1],
        format!("In the file {file}, the key endpoint is mandatory for the entry web when enabled is true.")
    );
    assert!(lines[2].contains("the data type of port is incorrect"));
    assert!(lines[3].contains("the length of code is incorrect"));
    assert!(!text.contains("Validation successful!"));
}

#[test]
fn test_files_are_reported_in_sorted_order() {
    let (_dir, rules, data) = fixture(&[
        ("b.yaml", "- owner: x\n"),
        ("a.yml", "- owner: y\n"),
        ("skip.txt", "- owner: z\n"),
    ]);

    let (code, text) = run(&request(&rules, vec![data.clone()], OutputFormat::Plain));
    assert_eq!(code, ExitCode::ValidationError);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(&data.join("a.yml").display().to_string()));
    assert!(lines[1].contains(&data.join("b.yaml").display().to_string()));
}

#[test]
fn test_no_files_found() {
    let (_dir, rules, data) = fixture(&[("notes.txt", "hello")]);

    let (code, text) = run(&request(&rules, vec![data], OutputFormat::Table));
    assert_eq!(code, ExitCode::Success);
    assert_eq!(text, "No YAML files found to validate.\n");
}

#[test]
fn test_missing_search_dirs_are_skipped() {
    let (dir, rules, _data) = fixture(&[]);
    let mut req = request(&rules, Vec::new(), OutputFormat::Plain);
    req.search_dirs = vec![dir.path().join("yaml_files2")];

    let (code, text) = run(&req);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(text, "No YAML files found to validate.\n");
}

#[test]
fn test_missing_explicit_path_is_file_error() {
    let (dir, rules, _data) = fixture(&[]);
    let req = request(&rules, vec![dir.path().join("absent")], OutputFormat::Plain);

    let err = execute_validate(&req, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, CliError::FileError(_)));
    assert_eq!(err.exit_code(), ExitCode::FileError);
}

#[test]
fn test_missing_rules_file_is_file_error() {
    let (dir, _rules, data) = fixture(&[("app.yaml", "- name: a\n")]);
    let req = request(&dir.path().join("nope.yaml"), vec![data], OutputFormat::Plain);

    let err = execute_validate(&req, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, CliError::FileError(_)));
}

#[test]
fn test_malformed_data_aborts_run() {
    let (_dir, rules, data) = fixture(&[
        ("a.yaml", "- name: a\n  owner: b\n"),
        ("b.yaml", "name: not-a-list\n"),
    ]);

    let err = execute_validate(&request(&rules, vec![data], OutputFormat::Plain), &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, CliError::ParseError(_)));
    assert_eq!(err.exit_code(), ExitCode::FileError);
}

#[test]
fn test_json_report() {
    let (_dir, rules, data) = fixture(&[
        ("a.yaml", "- name: a\n  owner: b\n- owner: c\n"),
        ("empty.yaml", ""),
    ]);

    colored::control::set_override(false);
    let mut out = Vec::new();
    let code = execute_validate(&request(&rules, vec![data], OutputFormat::Json), &mut out).unwrap();
    assert_eq!(code, ExitCode::ValidationError);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["files_checked"], 2);
    assert_eq!(json["records_checked"], 2);
    assert_eq!(json["violation_count"], 1);
    assert_eq!(json["violations"][0]["entry"], "#2");
    assert_eq!(json["violations"][0]["field"], "name");
    assert_eq!(json["violations"][0]["category"], "mandatory");
}

#[test]
fn test_yaml_report() {
    let (_dir, rules, data) = fixture(&[("a.yaml", "- name: a\n  owner: b\n")]);

    colored::control::set_override(false);
    let mut out = Vec::new();
    let code = execute_validate(&request(&rules, vec![data], OutputFormat::Yaml), &mut out).unwrap();
    assert_eq!(code, ExitCode::Success);

    let yaml: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();
    assert_eq!(yaml["valid"].as_bool(), Some(true));
    assert_eq!(yaml["violation_count"].as_u64(), Some(0));
}

#[test]
fn test_rules_command() {
    let (_dir, rules, _data) = fixture(&[]);

    colored::control::set_override(false);
    let mut out = Vec::new();
    let code = execute_rules(&rules, OutputFormat::Json, &mut out).unwrap();
    assert_eq!(code, ExitCode::Success);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["rule_count"], 6);
    assert_eq!(json["rules"]["mandatory"][0], "name");
    assert_eq!(json["rules"]["dependency"][0]["trigger"], "enabled");
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

/// Parse `args` and run them with settings resolved from `dir`
fn run_in(dir: &Path, args: &[&str]) -> (ExitCode, String) {
    let cli = RuleCheckCli::try_parse_from(std::iter::once("rulecheck").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    let code = rulecheck_cli::cli::run(cli, dir, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

/// Fixture with a settings file selecting JSON output and `.yml` files only
fn settings_fixture() -> (TempDir, String, String) {
    let (dir, rules, data) = fixture(&[
        ("a.yaml", "- name: a\n"),
        ("b.yml", "- name: b\n  owner: ops\n"),
    ]);
    fs::write(
        dir.path().join("rulecheck.toml"),
        "format = \"json\"\nextensions = [\"yml\"]\ncolor = false\n",
    )
    .unwrap();
    let rules = rules.to_str().unwrap().to_string();
    let data = data.to_str().unwrap().to_string();
    (dir, rules, data)
}

#[test]
fn test_settings_file_applies_without_flags() {
    let (dir, rules, data) = settings_fixture();

    let (code, text) = run_in(dir.path(), &["validate", "-r", &rules, &data]);
    assert_eq!(code, ExitCode::Success);

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["files_checked"], 1);
}

#[test]
fn test_format_flag_overrides_settings_file() {
    let (dir, rules, data) = settings_fixture();

    let (code, text) = run_in(dir.path(), &["validate", "-r", &rules, &data, "--format", "plain"]);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(text, "Validation successful!\n");
}

#[test]
fn test_ext_flag_replaces_settings_extensions() {
    let (dir, rules, data) = settings_fixture();

    let (code, text) = run_in(dir.path(), &["validate", "-r", &rules, &data, "--ext", "yaml"]);
    assert_eq!(code, ExitCode::ValidationError);

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["files_checked"], 1);
    assert_eq!(json["violation_count"], 1);
    assert!(json["violations"][0]["file"]
        .as_str()
        .unwrap()
        .ends_with("a.yaml"));
}

#[test]
fn test_malformed_settings_file_is_invalid_input() {
    let (dir, rules, data) = fixture(&[("a.yaml", "- name: a\n  owner: b\n")]);
    fs::write(dir.path().join("rulecheck.toml"), "colour = false\n").unwrap();

    let cli = RuleCheckCli::try_parse_from([
        "rulecheck",
        "validate",
        "-r",
        rules.to_str().unwrap(),
        data.to_str().unwrap(),
    ])
    .unwrap();
    let err = rulecheck_cli::cli::run(cli, dir.path(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, CliError::ConfigError(_)));
    assert_eq!(err.exit_code(), ExitCode::InvalidInput);
}

/// Run the built binary in `dir` with rulecheck variables cleared
fn binary(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rulecheck"))
        .args(args)
        .current_dir(dir)
        .env_remove("RULECHECK_RULES")
        .env_remove("RULECHECK_FORMAT")
        .env_remove("RULECHECK_CONFIG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_binary_missing_rules_flag_exits_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_binary_unknown_format_exits_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary(dir.path(), &["validate", "-r", "x.yaml", "--format", "bogus"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_binary_help_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary(dir.path(), &["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("validate"));
}

#[test]
fn test_binary_exit_codes_for_runs() {
    let (dir, rules, data) = fixture(&[("a.yaml", "- name: a\n")]);
    let rules = rules.to_str().unwrap();
    let data = data.to_str().unwrap();

    let output = binary(dir.path(), &["validate", "-r", rules, data, "--format", "plain"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("the key owner is not present"));

    let output = binary(dir.path(), &["validate", "-r", "missing.yaml", data]);
    assert_eq!(output.status.code(), Some(4));
}
