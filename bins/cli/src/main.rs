//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CourseCommandInput, ValidateCommandInput, run_course, run_info, run_rules_show, run_validate,
};
use error::{CliError, ExitCode};
use field_rules_domain::VerdictPolicy;
use format::{OutputArgs, OutputMode, to_json_line};
use logging::{LogFormat, init_tracing};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "frules",
    version,
    about = "Validate records against declarative field rules",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Verdict policy; overrides the rule table and `FIELD_RULES_VERDICT_POLICY`.
    #[arg(long, global = true, value_enum)]
    verdict_policy: Option<PolicyArg>,

    /// Diagnostic log format (filter with `FIELD_RULES_LOG`).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Valid only when every rule passes.
    AllRulesPass,
    /// The last evaluated rule decides.
    LastRuleWins,
}

impl From<PolicyArg> for VerdictPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::AllRulesPass => Self::AllRulesPass,
            PolicyArg::LastRuleWins => Self::LastRuleWins,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show build and version details.
    Info,
    /// Validate one subject against a rule table.
    Validate {
        /// Rule table path (JSON/TOML). Defaults to the built-in course rules.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Subject JSON: `{"schema": "...", "fields": {...}}`.
        #[arg(long)]
        subject_json: Option<String>,
        /// Read the subject JSON from stdin.
        #[arg(long, conflicts_with = "subject_json")]
        stdin: bool,
    },
    /// Rule table commands.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Submit the course form.
    Course {
        /// Course title as typed.
        #[arg(long, default_value = "")]
        title: String,
        /// Course price as typed; coerced like a numeric input box.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        price: String,
    },
}

#[derive(Debug, Subcommand)]
enum RulesCommands {
    /// Print the effective registry and verdict policy.
    Show {
        /// Rule table path (JSON/TOML). Defaults to the built-in course rules.
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);
    let mode = OutputMode::from_args(&cli.output);
    let policy = cli.verdict_policy.map(VerdictPolicy::from);

    match run(&cli.command, mode, policy) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => {
            tracing::debug!(%error, "command failed");
            if mode.is_json() {
                match format_error_output(&error).and_then(|output| write_output(&output)) {
                    Ok(()) => std::process::ExitCode::from(error.exit_code().as_u8()),
                    Err(write_error) => exit_with_error(&write_error),
                }
            } else {
                exit_with_error(&error)
            }
        },
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(
    command: &Commands,
    mode: OutputMode,
    policy: Option<VerdictPolicy>,
) -> Result<CliOutput, CliError> {
    match command {
        Commands::Info => run_info(mode),
        Commands::Validate {
            rules,
            subject_json,
            stdin,
        } => {
            let subject_json = resolve_subject(*stdin, subject_json.as_deref())?;
            run_validate(
                mode,
                &ValidateCommandInput {
                    rules_path: rules.as_deref(),
                    subject_json: &subject_json,
                    policy,
                },
            )
        },
        Commands::Rules { command } => match command {
            RulesCommands::Show { rules } => run_rules_show(mode, rules.as_deref(), policy),
        },
        Commands::Course { title, price } => run_course(
            mode,
            &CourseCommandInput {
                title,
                price,
                policy,
            },
        ),
    }
}

/// JSON error payload on stdout, human line on stderr.
fn format_error_output(error: &CliError) -> Result<CliOutput, CliError> {
    let payload = match error {
        CliError::Envelope(envelope) => serde_json::json!({
            "status": "error",
            "error": envelope,
        }),
        other => serde_json::json!({
            "status": "error",
            "error": { "message": other.to_string() },
        }),
    };

    Ok(CliOutput {
        stdout: to_json_line(&payload)?,
        stderr: format!("error: {error}\n"),
        exit_code: error.exit_code(),
    })
}

fn resolve_subject(from_stdin: bool, subject_json: Option<&str>) -> Result<String, CliError> {
    if from_stdin {
        return read_stdin_subject();
    }
    subject_json
        .map(str::to_owned)
        .ok_or_else(|| CliError::InvalidInput("missing --subject-json or --stdin".to_string()))
}

fn read_stdin_subject() -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let trimmed = buf.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidInput("stdin subject is empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
