//! `validate` and `rules show` E2E tests against the config fixtures.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("config")
        .join("fixtures")
        .join(relative)
}

fn frules() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_frules"));
    command
        .env_remove("FIELD_RULES_VERDICT_POLICY")
        .env_remove("FIELD_RULES_LOG");
    command
}

fn json_stdout(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn toml_rules_validate_subjects() -> io::Result<()> {
    let rules = fixture_path("rules/course.toml");

    let output = frules()
        .args(["validate", "--rules"])
        .arg(&rules)
        .args([
            "--subject-json",
            r#"{"schema":"Course","fields":{"title":"Algorithms","price":10}}"#,
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "valid\n");

    let output = frules()
        .args(["validate", "--rules"])
        .arg(&rules)
        .args([
            "--subject-json",
            r#"{"schema":"Course","fields":{"title":"Algorithms","price":-3}}"#,
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("invalid\n"));

    // Scenario D: nothing registered for the schema.
    let output = frules()
        .args(["validate", "--rules"])
        .arg(&rules)
        .args(["--subject-json", r#"{"schema":"Student","fields":{"x":null}}"#])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn json_table_policy_and_flag_override() -> io::Result<()> {
    let rules = fixture_path("rules/course.json");
    let subject = r#"{"schema":"Course","fields":{"title":"","price":10}}"#;

    // The fixture selects last-rule-wins.
    let output = frules()
        .args(["--json", "validate", "--rules"])
        .arg(&rules)
        .args(["--subject-json", subject])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    let value = json_stdout(&output)?;
    assert_eq!(value["status"], "valid");
    assert_eq!(value["report"]["policy"], "last-rule-wins");
    assert_eq!(value["report"]["failures"][0]["field"], "title");

    let output = frules()
        .args(["--json", "--verdict-policy", "all-rules-pass", "validate", "--rules"])
        .arg(&rules)
        .args(["--subject-json", subject])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(json_stdout(&output)?["status"], "invalid");
    Ok(())
}

#[test]
fn subject_can_be_read_from_stdin() -> io::Result<()> {
    let mut child = frules()
        .args(["validate", "--rules"])
        .arg(fixture_path("rules/course.json"))
        .arg("--stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("missing child stdin"))?;
    stdin.write_all(br#"{"schema":"Instructor","fields":{"name":"Ada","rate":0}}"#)?;
    drop(stdin);

    let output = child.wait_with_output()?;
    // Last rule for Instructor is `rate: positive`, which fails.
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn broken_inputs_map_to_exit_codes() -> io::Result<()> {
    let output = frules()
        .args(["--json", "validate", "--rules"])
        .arg(fixture_path("rules/unknown-rule.json"))
        .args(["--subject-json", r#"{"schema":"Course"}"#])
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    let value = json_stdout(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"]["code"], "invalid_rule_table");
    assert_eq!(value["error"]["metadata"]["tag"], "email");

    let output = frules()
        .args(["validate", "--subject-json", "[1, 2]"])
        .output()?;
    assert_eq!(output.status.code(), Some(3));

    let output = frules()
        .args(["validate", "--rules"])
        .arg(fixture_path("rules/missing.toml"))
        .args(["--subject-json", r#"{"schema":"Course"}"#])
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("rules_file_not_found"));
    Ok(())
}

#[test]
fn rules_show_prints_the_loaded_table() -> io::Result<()> {
    let output = frules()
        .args(["--json", "rules", "show", "--rules"])
        .arg(fixture_path("rules/course.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let value = json_stdout(&output)?;
    assert_eq!(value["policy"], "last-rule-wins");
    assert_eq!(value["registry"]["Course"]["title"], serde_json::json!(["required"]));
    assert_eq!(value["registry"]["Instructor"]["rate"], serde_json::json!(["positive"]));

    let output = frules().args(["rules", "show"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("policy: all-rules-pass\nCourse\n"));
    Ok(())
}

#[test]
fn info_reports_versions() -> io::Result<()> {
    let output = frules().args(["--json", "info"]).output()?;
    assert!(output.status.success());

    let value = json_stdout(&output)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["rules"], serde_json::json!(["required", "positive"]));
    assert_eq!(value["defaultPolicy"], "all-rules-pass");
    Ok(())
}
