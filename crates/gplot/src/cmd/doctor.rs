use std::process::Command;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use gplot_plotter::Plotter;
use gplot_transport::GnuplotConfig;
use serde::Serialize;

use crate::cmd::{DoctorArgs, Launch};
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, launch: &Launch, format: OutputFormat) -> CliResult<i32> {
    let output = DoctorOutput::from_checks(run_checks(launch));
    print_doctor(&output, format);

    if output.overall == "pass" {
        Ok(SUCCESS)
    } else {
        Ok(HEALTH_CHECK_FAILED)
    }
}

impl DoctorOutput {
    fn from_checks(checks: Vec<CheckResult>) -> Self {
        let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
        Self {
            checks,
            overall: if has_fail { "fail" } else { "pass" },
        }
    }
}

fn run_checks(launch: &Launch) -> Vec<CheckResult> {
    let config = match launch.config(false) {
        Ok(config) => config,
        Err(err) => {
            return vec![
                CheckResult::new("executable", CheckStatus::Fail, err.to_string()),
                CheckResult::new("version", CheckStatus::Skip, "no executable"),
                CheckResult::new("session", CheckStatus::Skip, "no executable"),
            ];
        }
    };

    vec![
        CheckResult::new(
            "executable",
            CheckStatus::Pass,
            config.executable.display().to_string(),
        ),
        version_check(&config),
        session_check(&config),
    ]
}

fn version_check(config: &GnuplotConfig) -> CheckResult {
    match Command::new(&config.executable).arg("--version").output() {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout);
            match parse_version(&text) {
                Some(version) => CheckResult::new("version", CheckStatus::Pass, version),
                None => CheckResult::new(
                    "version",
                    CheckStatus::Fail,
                    format!("unrecognized version output: {:?}", text.trim()),
                ),
            }
        }
        Ok(out) => CheckResult::new(
            "version",
            CheckStatus::Fail,
            format!("--version exited with {}", out.status),
        ),
        Err(err) => CheckResult::new("version", CheckStatus::Fail, err.to_string()),
    }
}

/// Parse `gnuplot 5.4 patchlevel 8` into `5.4.8`.
fn parse_version(output: &str) -> Option<String> {
    let mut words = output.split_whitespace();
    if words.next()? != "gnuplot" {
        return None;
    }
    let version = words.next()?;
    match (words.next(), words.next()) {
        (Some("patchlevel"), Some(patch)) => Some(format!("{version}.{patch}")),
        _ => Some(version.to_string()),
    }
}

/// Open a real session, configure binary mode and close it again.
fn session_check(config: &GnuplotConfig) -> CheckResult {
    let result = Plotter::open(config).and_then(|mut plotter| plotter.close());
    match result {
        Ok(()) => CheckResult::new("session", CheckStatus::Pass, "binary mode accepted"),
        Err(err) => CheckResult::new("session", CheckStatus::Fail, err.to_string()),
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHECK", "STATUS", "DETAIL"]);
            for c in &output.checks {
                table.add_row(vec![
                    c.name.to_string(),
                    status_text(c.status).to_string(),
                    c.detail.clone(),
                ]);
            }
            println!("{table}");
            println!("overall: {}", output.overall);
        }
        OutputFormat::Pretty => {
            println!("gplot doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<12} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Skip => "SKIP",
    }
}
