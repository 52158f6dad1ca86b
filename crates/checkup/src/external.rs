//! Downstream build and test checks
//!
//! Treats a rendered tree as an independent project: the external package
//! builder must produce a wheel artifact and the generated test suite must
//! pass. Child process output is captured and attached to every result so
//! a failure is never reported without its diagnostics.

use anyhow::Result;
use pystamp_core::{run_in_dir, tool_on_path};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Result of one external check
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckResult {
    /// Check name
    pub name: String,
    /// Whether the check succeeded
    pub success: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Combined output from the command
    pub output: String,
    /// Whether the check was skipped
    pub skipped: bool,
    /// Reason for skipping (if skipped)
    pub skip_reason: Option<String>,
}

impl CheckResult {
    fn skip(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            duration_ms: 0,
            output: String::new(),
            skipped: true,
            skip_reason: Some(reason.to_string()),
        }
    }
}

/// Run a named external command as a check
pub fn run_check(name: &str, program: &str, args: &[&str], dir: &Path) -> Result<CheckResult> {
    let start = Instant::now();
    let out = run_in_dir(program, args, dir)?;

    Ok(CheckResult {
        name: name.to_string(),
        success: out.success,
        duration_ms: start.elapsed().as_millis() as u64,
        output: out.output,
        skipped: false,
        skip_reason: None,
    })
}

/// Build check: `uv build` must succeed and leave a wheel in dist/
pub fn check_build(project_dir: &Path) -> Result<CheckResult> {
    if !tool_on_path("uv") {
        return Ok(CheckResult::skip("build", "uv not found on PATH"));
    }

    let mut result = run_check("build", "uv", &["build"], project_dir)?;

    if result.success && !wheel_built(project_dir) {
        result.success = false;
        result.output.push_str("\nno wheel artifact found in dist/");
    }

    Ok(result)
}

/// Test check: the generated test suite must pass under the external runner
pub fn check_tests(project_dir: &Path) -> Result<CheckResult> {
    if !tool_on_path("uv") {
        return Ok(CheckResult::skip("tests", "uv not found on PATH"));
    }

    run_check("tests", "uv", &["run", "pytest"], project_dir)
}

fn wheel_built(project_dir: &Path) -> bool {
    let dist = project_dir.join("dist");
    let entries = match fs::read_dir(&dist) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    entries
        .filter_map(|e| e.ok())
        .any(|e| e.path().extension().map(|ext| ext == "whl").unwrap_or(false))
}
