//! Course form E2E tests.

use std::io;
use std::process::{Command, Output};

fn frules(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_frules"))
        .args(args)
        .env_remove("FIELD_RULES_VERDICT_POLICY")
        .env_remove("FIELD_RULES_LOG")
        .output()
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn course_form_accepts_and_rejects_submissions() -> io::Result<()> {
    // Scenario A: complete form.
    let output = frules(&["course", "--title", "Algorithms", "--price", "10"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_text(&output), "accepted: Algorithms (10)\n");

    // Scenario C: negative price.
    let output = frules(&["course", "--title", "Algorithms", "--price", "-3"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_text(&output).starts_with("Invalid input, please try again!\n"));

    // Blank price coerces to zero and fails `required`.
    let output = frules(&["course", "--title", "Algorithms", "--price", "  "])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_text(&output).contains("price (required)"));
    Ok(())
}

#[test]
fn course_form_empty_title_depends_on_policy() -> io::Result<()> {
    // Scenario B.
    let output = frules(&["course", "--title", "", "--price", "10"])?;
    assert_eq!(output.status.code(), Some(2));

    let output = frules(&[
        "--verdict-policy",
        "last-rule-wins",
        "course",
        "--title",
        "",
        "--price",
        "10",
    ])?;
    assert_eq!(output.status.code(), Some(0));

    let output = Command::new(env!("CARGO_BIN_EXE_frules"))
        .args(["course", "--title", "", "--price", "10"])
        .env("FIELD_RULES_VERDICT_POLICY", "last-rule-wins")
        .env_remove("FIELD_RULES_LOG")
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn course_form_json_report() -> io::Result<()> {
    let output = frules(&[
        "--output", "json", "course", "--title", "", "--price", "-3",
    ])?;
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["status"], "invalid");
    assert_eq!(value["report"]["schema"], "Course");
    assert_eq!(value["report"]["checked"], 3);

    let failures = value["report"]["failures"]
        .as_array()
        .ok_or_else(|| io::Error::other("missing report.failures"))?;
    let failed: Vec<(&str, &str)> = failures
        .iter()
        .filter_map(|failure| Some((failure["field"].as_str()?, failure["rule"].as_str()?)))
        .collect();
    assert_eq!(failed, [("title", "required"), ("price", "positive")]);

    assert_eq!(value["error"]["metadata"]["field.title"], "required");
    Ok(())
}

#[test]
fn invalid_env_policy_is_reported() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_frules"))
        .args(["course", "--title", "Algorithms", "--price", "10"])
        .env("FIELD_RULES_VERDICT_POLICY", "majority")
        .env_remove("FIELD_RULES_LOG")
        .output()?;
    assert_eq!(output.status.code(), Some(3));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid_env"), "stderr: {stderr}");
    Ok(())
}
