//! checkup - Verification for rendered pystamp projects
//!
//! Commands:
//! - structural <DIR>: verify the render contract against an answers file
//! - build <DIR>: run the external package builder, expect a wheel
//! - tests <DIR>: run the generated test suite
//! - all <DIR>: structural, then build, then tests

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use checkup::{check_build, check_tests, verify_tree, CheckResult, ContractReport};
use scaffold::{Answers, ResolvedAnswers};

#[derive(Parser)]
#[command(name = "checkup")]
#[command(about = "Verification for rendered pystamp projects")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    checkup structural ./myapp --answers answers.json
    checkup build ./myapp
    checkup tests ./myapp
    checkup all ./myapp --answers answers.json --json

EXIT CODES:
    0  all checks passed (or were skipped)
    1  at least one check failed
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the render contract against an answers file
    Structural {
        /// Rendered project directory
        dir: PathBuf,

        /// JSON answers file the project was rendered from
        #[arg(long, value_name = "FILE")]
        answers: PathBuf,
    },

    /// Run the external package builder, expect a wheel in dist/
    Build {
        /// Rendered project directory
        dir: PathBuf,
    },

    /// Run the generated test suite
    Tests {
        /// Rendered project directory
        dir: PathBuf,
    },

    /// Run every check
    All {
        /// Rendered project directory
        dir: PathBuf,

        /// JSON answers file the project was rendered from
        #[arg(long, value_name = "FILE")]
        answers: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Structural { ref dir, ref answers } => {
            let resolved = load_answers(answers)?;
            cmd_structural(dir, &resolved, cli.json)?
        }
        Commands::Build { ref dir } => report_check(&check_build(dir)?, cli.json),
        Commands::Tests { ref dir } => report_check(&check_tests(dir)?, cli.json),
        Commands::All { ref dir, ref answers } => {
            let resolved = load_answers(answers)?;
            let structural_ok = cmd_structural(dir, &resolved, cli.json)?;
            let build_ok = report_check(&check_build(dir)?, cli.json);
            let tests_ok = report_check(&check_tests(dir)?, cli.json);
            structural_ok && build_ok && tests_ok
        }
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

fn load_answers(path: &Path) -> Result<ResolvedAnswers> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
    let answers: Answers = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse answers file: {}", path.display()))?;

    answers
        .resolve()
        .with_context(|| format!("Incomplete answers file: {}", path.display()))
}

/// Run and report the structural check, returning whether it passed
fn cmd_structural(dir: &Path, answers: &ResolvedAnswers, json: bool) -> Result<bool> {
    let start = std::time::Instant::now();
    let report = verify_tree(dir, answers)?;
    let duration = format_duration(start.elapsed().as_millis() as u64);

    if json {
        print_structural_json(&report);
    } else {
        print_structural(&report, &duration);
    }

    Ok(report.ok())
}

fn print_structural(report: &ContractReport, duration: &str) {
    if report.ok() {
        println!("[\x1b[2m{:>5}\x1b[0m] \x1b[32mok\x1b[0m structural", duration);
        return;
    }

    println!("[\x1b[2m{:>5}\x1b[0m] \x1b[31mFAIL\x1b[0m structural", duration);
    for finding in &report.findings {
        println!("     \x1b[2m{}: {}\x1b[0m", finding.check, finding.detail);
    }
}

fn print_structural_json(report: &ContractReport) {
    println!(
        "{}",
        serde_json::json!({
            "name": "structural",
            "success": report.ok(),
            "findings": report.findings,
        })
    );
}

/// Print one external check result, returning whether it passed
fn report_check(result: &CheckResult, json: bool) -> bool {
    if json {
        println!("{}", serde_json::to_string(result).unwrap_or_default());
        return result.success;
    }

    if result.skipped {
        println!(
            "[  -  ] \x1b[33mskip\x1b[0m {} \x1b[2m({})\x1b[0m",
            result.name,
            result.skip_reason.as_deref().unwrap_or("skipped")
        );
        return true;
    }

    let duration = format_duration(result.duration_ms);
    if result.success {
        println!(
            "[\x1b[2m{:>5}\x1b[0m] \x1b[32mok\x1b[0m {}",
            duration, result.name
        );
    } else {
        println!(
            "[\x1b[2m{:>5}\x1b[0m] \x1b[31mFAIL\x1b[0m {}",
            duration, result.name
        );
        print_errors(&result.output);
    }

    result.success
}

fn print_errors(output: &str) {
    let max_lines = 10;
    let total_lines = output.lines().count();

    for line in output.lines().take(max_lines) {
        println!("     \x1b[2m{}\x1b[0m", line);
    }

    if total_lines > max_lines {
        println!(
            "     \x1b[2m... and {} more lines\x1b[0m",
            total_lines - max_lines
        );
    }
}

fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60000;
        let secs = (ms % 60000) / 1000;
        format!("{}m{}s", mins, secs)
    }
}
