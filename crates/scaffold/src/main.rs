//! scaffold - Project scaffolding for pystamp
//!
//! Render a modern uv-based Python project skeleton from an answer set.
//!
//! Commands:
//! - new <PROJECT_NAME>: Render a new project
//! - plan: Show the files a render would produce
//! - vars: Show the template variables

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use scaffold::{blueprint, render::render_resolved, Answers, RenderOptions};

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(about = "Project scaffolding for pystamp - render modern Python project skeletons")]
#[command(version)]
#[command(after_help = r#"ANSWERS:
    Answers come from --answers (a JSON file) and individual flags.
    Flags win over the file. Required: project name, --description,
    --author, --full-name, --email.

TEMPLATE VARIABLES:
    {{PROJECT_NAME}}    Project name
    {{MODULE_NAME}}     Module name (default: slugified project name)
    {{DESCRIPTION}}     Project description
    {{AUTHOR_NAME}}     Author display name (title-cased)
    {{AUTHOR_EMAIL}}    Author email
    {{PYTHON_VERSION}}  Python version for requires-python and image tags

EXAMPLES:
    scaffold new my-app --description "Demo app" --author "jane doe" \
        --full-name "Jane Doe" --email jane@example.com
    scaffold new my-app --answers answers.json --dockerfile --direnv
    scaffold plan my-app --answers answers.json --json
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Answer inputs shared by render-shaped commands
#[derive(Args, Clone)]
struct AnswerArgs {
    /// Read answers from a JSON file
    #[arg(long, value_name = "FILE")]
    answers: Option<PathBuf>,

    /// Module name (default: slugified project name)
    #[arg(long)]
    module_name: Option<String>,

    /// Project description
    #[arg(long)]
    description: Option<String>,

    /// Author name (title-cased in pyproject authors)
    #[arg(long)]
    author: Option<String>,

    /// Author full name
    #[arg(long)]
    full_name: Option<String>,

    /// Author email
    #[arg(long)]
    email: Option<String>,

    /// Python version, inserted verbatim
    #[arg(long, value_name = "VERSION")]
    python: Option<String>,

    /// Skip the pre-commit config
    #[arg(long)]
    no_precommit: bool,

    /// Skip commitizen
    #[arg(long)]
    no_commitizen: bool,

    /// Include mkdocs documentation scaffolding
    #[arg(long)]
    mkdocs: bool,

    /// Include Dockerfile and .dockerignore
    #[arg(long)]
    dockerfile: bool,

    /// Include a direnv .envrc
    #[arg(long)]
    direnv: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a new project
    New {
        /// Project name
        project_name: String,

        #[command(flatten)]
        answers: AnswerArgs,

        /// Destination directory (default: the module name)
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Overwrite an existing destination
        #[arg(long)]
        force: bool,

        /// Don't initialize a git repository
        #[arg(long)]
        no_git: bool,
    },

    /// Show the files a render would produce
    Plan {
        /// Project name
        project_name: Option<String>,

        #[command(flatten)]
        answers: AnswerArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the template variables
    Vars,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            project_name,
            answers,
            dest,
            force,
            no_git,
        } => cmd_new(&project_name, &answers, dest, force, no_git),

        Commands::Plan {
            project_name,
            answers,
            json,
        } => cmd_plan(project_name.as_deref(), &answers, json),

        Commands::Vars => cmd_vars(),
    }
}

impl AnswerArgs {
    /// Assemble the answer set: file first, then flag overrides
    fn collect(&self, project_name: Option<&str>) -> Result<Answers> {
        let mut answers = match &self.answers {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse answers file: {}", path.display()))?
            }
            None => Answers::default(),
        };

        if let Some(name) = project_name {
            answers.project_name = Some(name.to_string());
        }
        if let Some(v) = &self.module_name {
            answers.module_name = Some(v.clone());
        }
        if let Some(v) = &self.description {
            answers.description = Some(v.clone());
        }
        if let Some(v) = &self.author {
            answers.user_name = Some(v.clone());
        }
        if let Some(v) = &self.full_name {
            answers.user_full_name = Some(v.clone());
        }
        if let Some(v) = &self.email {
            answers.user_email = Some(v.clone());
        }
        if let Some(v) = &self.python {
            answers.python_version = Some(v.clone());
        }
        if self.no_precommit {
            answers.include_precommit = Some(false);
        }
        if self.no_commitizen {
            answers.use_commitizen = Some(false);
        }
        if self.mkdocs {
            answers.include_mkdocs = Some(true);
        }
        if self.dockerfile {
            answers.include_dockerfile = Some(true);
        }
        if self.direnv {
            answers.include_direnv = Some(true);
        }

        Ok(answers)
    }
}

/// Render a new project
fn cmd_new(
    project_name: &str,
    args: &AnswerArgs,
    dest: Option<PathBuf>,
    force: bool,
    no_git: bool,
) -> Result<()> {
    let answers = args.collect(Some(project_name))?;
    let resolved = answers.resolve()?;
    let dest = dest.unwrap_or_else(|| PathBuf::from(&resolved.module_name));

    println!("info: Rendering project: {}", resolved.project_name);

    let options = RenderOptions {
        force,
        init_git: !no_git,
    };
    let rendered = render_resolved(&resolved, &dest, &options)
        .with_context(|| format!("Failed to render project: {}", resolved.project_name))?;

    println!(
        "success: Project created: {}",
        rendered.project_dir.display()
    );
    println!();
    println!("Next steps:");
    println!("  cd {}", rendered.project_dir.display());
    println!("  uv sync");
    println!("  uv run pytest");
    if resolved.include_precommit {
        println!("  uv run prek install");
    }

    Ok(())
}

/// Show the file manifest for an answer set
fn cmd_plan(project_name: Option<&str>, args: &AnswerArgs, json: bool) -> Result<()> {
    let answers = args.collect(project_name)?;
    let resolved = answers.resolve()?;
    let planned = blueprint::plan(&resolved);

    if json {
        let files: Vec<_> = planned
            .iter()
            .map(|f| {
                serde_json::json!({
                    "path": f.rel_path.to_string_lossy(),
                    "bytes": f.content.len(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "module_name": resolved.module_name,
                "files": files,
            }))?
        );
        return Ok(());
    }

    println!("\x1b[1mPlan: {}\x1b[0m", resolved.project_name);
    println!("\x1b[2mModule: {}\x1b[0m", resolved.module_name);
    println!();
    for file in &planned {
        println!("  \x1b[32m{}\x1b[0m", file.rel_path.display());
    }

    Ok(())
}

/// Show the template variables
fn cmd_vars() -> Result<()> {
    println!("\x1b[1mTemplate Variables\x1b[0m");
    println!();
    println!("  {{{{PROJECT_NAME}}}}     - Project name");
    println!("  {{{{MODULE_NAME}}}}      - Module name (default: slugified project name)");
    println!("  {{{{DESCRIPTION}}}}      - Project description");
    println!("  {{{{AUTHOR_NAME}}}}      - Author display name (title-cased)");
    println!("  {{{{AUTHOR_FULL_NAME}}}} - Author full name");
    println!("  {{{{AUTHOR_EMAIL}}}}     - Author email");
    println!("  {{{{PYTHON_VERSION}}}}   - Python version for requires-python and image tags");
    println!("  {{{{DATE}}}}             - Current date (YYYY-MM-DD)");
    println!("  {{{{YEAR}}}}             - Current year");
    println!();
    println!("Computed per render:");
    println!("  {{{{DEV_DEPENDENCIES}}}} - Dev dependency group entries");
    println!("  {{{{COMMITIZEN_HOOKS}}}} - Commitizen pre-commit block");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_answers_file() {
        let args = AnswerArgs {
            answers: None,
            module_name: Some("mod".to_string()),
            description: Some("desc".to_string()),
            author: Some("jane doe".to_string()),
            full_name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            python: Some("3.12".to_string()),
            no_precommit: true,
            no_commitizen: false,
            mkdocs: true,
            dockerfile: false,
            direnv: false,
        };

        let answers = args.collect(Some("proj")).unwrap();
        let resolved = answers.resolve().unwrap();

        assert_eq!(resolved.project_name, "proj");
        assert_eq!(resolved.module_name, "mod");
        assert_eq!(resolved.python_version, "3.12");
        assert!(!resolved.include_precommit);
        assert!(resolved.use_commitizen);
        assert!(resolved.include_mkdocs);
    }
}
