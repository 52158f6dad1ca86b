//! Rendering a blueprint into a concrete project directory
//!
//! Files are written into a staging directory next to the destination and
//! the staging directory is renamed into place once every file exists. A
//! failed render never leaves a partial destination behind.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::answers::{Answers, ResolvedAnswers};
use crate::blueprint::{self, PlannedFile};

/// Options controlling a render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Remove an existing destination first
    pub force: bool,
    /// Initialize a git repository in the result
    pub init_git: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            force: false,
            init_git: true,
        }
    }
}

/// A completed render
#[derive(Debug)]
pub struct RenderedProject {
    /// The project directory
    pub project_dir: PathBuf,
    /// The resolved answers the render used
    pub answers: ResolvedAnswers,
    /// Files written, relative to the project directory
    pub files: Vec<PathBuf>,
}

/// Render a project skeleton from an answer set
pub fn render(answers: &Answers, dest: &Path, options: &RenderOptions) -> Result<RenderedProject> {
    let resolved = answers.resolve()?;
    render_resolved(&resolved, dest, options)
}

/// Render from already-resolved answers
pub fn render_resolved(
    answers: &ResolvedAnswers,
    dest: &Path,
    options: &RenderOptions,
) -> Result<RenderedProject> {
    if dest.exists() {
        if options.force {
            fs::remove_dir_all(dest).with_context(|| {
                format!("Failed to remove existing directory: {}", dest.display())
            })?;
        } else {
            bail!("Destination already exists: {}", dest.display());
        }
    }

    let planned = blueprint::plan(answers);

    let staging = staging_dir_for(dest)?;
    if let Err(e) = write_planned(&staging, &planned) {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    if let Err(e) = fs::rename(&staging, dest) {
        let _ = fs::remove_dir_all(&staging);
        return Err(e)
            .with_context(|| format!("Failed to move render into place: {}", dest.display()));
    }

    if options.init_git {
        init_git(dest);
    }

    Ok(RenderedProject {
        project_dir: dest.to_path_buf(),
        answers: answers.clone(),
        files: planned.into_iter().map(|f| f.rel_path).collect(),
    })
}

/// Create the staging directory next to the destination
///
/// Staging on the same filesystem keeps the final rename atomic.
fn staging_dir_for(dest: &Path) -> Result<PathBuf> {
    let name = dest
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid destination path: {}", dest.display()))?;

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create parent directory: {}", parent.display()))?;

    let staging = parent.join(format!(".{}.staging-{}", name, std::process::id()));
    if staging.exists() {
        fs::remove_dir_all(&staging)
            .with_context(|| format!("Failed to clear stale staging: {}", staging.display()))?;
    }
    fs::create_dir_all(&staging)
        .with_context(|| format!("Failed to create staging: {}", staging.display()))?;

    Ok(staging)
}

fn write_planned(root: &Path, files: &[PlannedFile]) -> Result<()> {
    for file in files {
        let path = root.join(&file.rel_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
    }

    Ok(())
}

/// Best-effort git initialization, as project scaffolds usually want
fn init_git(dest: &Path) {
    let _ = pystamp_core::run_in_dir("git", &["init", "-q"], dest);
    let _ = pystamp_core::run_in_dir("git", &["add", "."], dest);
}
