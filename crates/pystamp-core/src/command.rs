//! External command invocation
//!
//! Commands run synchronously in a working directory with stdout and
//! stderr captured together, so a failing tool can be reported with its
//! full diagnostic output attached.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of an external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the command exited successfully
    pub success: bool,
    /// Combined stdout and stderr
    pub output: String,
}

/// Run a command in a working directory, capturing combined output
pub fn run_in_dir(program: &str, args: &[&str], dir: &Path) -> Result<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {} in {}", program, dir.display()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    Ok(CommandOutput {
        success: output.status.success(),
        output: format!("{}{}", stdout, stderr),
    })
}

/// Check whether a tool is available on PATH
pub fn tool_on_path(name: &str) -> bool {
    match std::env::var_os("PATH") {
        Some(path) => std::env::split_paths(&path).any(|dir| dir.join(name).is_file()),
        None => false,
    }
}
