//! Structural render-contract checks
//!
//! Verifies a rendered project tree against the answer set that produced
//! it. The contract is a data table, not hand-written per-case assertions:
//! every toggle combination runs through the same file expectations and
//! pyproject field checks, so a toggle leaking into another's output shows
//! up as a named finding.

use anyhow::Result;
use scaffold::{ResolvedAnswers, Variables};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single contract violation
#[derive(Debug, Clone, serde::Serialize)]
pub struct Finding {
    /// Check that produced the finding
    pub check: &'static str,
    /// What was wrong
    pub detail: String,
}

/// Result of verifying one rendered tree
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ContractReport {
    pub findings: Vec<Finding>,
}

impl ContractReport {
    /// True when the tree satisfies the contract
    pub fn ok(&self) -> bool {
        self.findings.is_empty()
    }

    fn push(&mut self, check: &'static str, detail: String) {
        self.findings.push(Finding { check, detail });
    }
}

/// File expectations for an answer set: (path, should exist)
///
/// Absence expectations are listed explicitly so a file leaking in while
/// its toggle is off fails the same way as a missing file.
fn file_expectations(answers: &ResolvedAnswers) -> Vec<(PathBuf, bool)> {
    let module_dir = PathBuf::from("src").join(&answers.module_name);

    vec![
        (PathBuf::from("pyproject.toml"), true),
        (PathBuf::from("README.md"), true),
        (module_dir.join("__init__.py"), true),
        (module_dir.join("hello.py"), true),
        (PathBuf::from("tests/test_import.py"), true),
        (
            PathBuf::from(".pre-commit-config.yaml"),
            answers.include_precommit,
        ),
        (PathBuf::from("mkdocs.yml"), answers.include_mkdocs),
        (PathBuf::from("docs"), answers.include_mkdocs),
        (PathBuf::from("Dockerfile"), answers.include_dockerfile),
        (PathBuf::from(".dockerignore"), answers.include_dockerfile),
        (PathBuf::from(".envrc"), answers.include_direnv),
    ]
}

/// Dev-group prefixes each toggle implies: (prefix, should be present)
fn dev_group_expectations(answers: &ResolvedAnswers) -> Vec<(&'static str, bool)> {
    vec![
        ("pytest", true),
        ("prek", answers.include_precommit),
        ("commitizen", answers.use_commitizen),
        ("mkdocs", answers.include_mkdocs),
    ]
}

/// Verify a rendered tree against the answers that produced it
pub fn verify_tree(project_dir: &Path, answers: &ResolvedAnswers) -> Result<ContractReport> {
    let mut report = ContractReport::default();

    for (rel, expected) in file_expectations(answers) {
        let exists = project_dir.join(&rel).exists();
        if exists != expected {
            let detail = if expected {
                format!("{} is missing", rel.display())
            } else {
                format!("{} exists but its toggle is off", rel.display())
            };
            report.push("files", detail);
        }
    }

    check_pyproject(project_dir, answers, &mut report);

    if answers.include_dockerfile {
        check_dockerfile(project_dir, answers, &mut report);
    }
    if answers.include_direnv {
        check_envrc(project_dir, &mut report);
    }
    if answers.include_precommit && !answers.use_commitizen {
        check_precommit_scrubbed(project_dir, &mut report);
    }

    check_placeholders(project_dir, &mut report);

    Ok(report)
}

fn check_pyproject(project_dir: &Path, answers: &ResolvedAnswers, report: &mut ContractReport) {
    let path = project_dir.join("pyproject.toml");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            report.push("pyproject", format!("unreadable: {}", e));
            return;
        }
    };

    let value: toml::Value = match content.parse() {
        Ok(value) => value,
        Err(e) => {
            report.push("pyproject", format!("does not parse: {}", e));
            return;
        }
    };

    let project = value.get("project");

    expect_str(
        project.and_then(|p| p.get("name")),
        &answers.module_name,
        "project.name",
        report,
    );
    expect_str(
        project.and_then(|p| p.get("description")),
        &answers.description,
        "project.description",
        report,
    );

    let author = project.and_then(|p| p.get("authors")).and_then(|a| a.get(0));
    expect_str(
        author.and_then(|a| a.get("name")),
        &answers.author_display_name(),
        "project.authors[0].name",
        report,
    );
    expect_str(
        author.and_then(|a| a.get("email")),
        &answers.user_email,
        "project.authors[0].email",
        report,
    );

    expect_str(
        project
            .and_then(|p| p.get("scripts"))
            .and_then(|s| s.get(answers.module_name.as_str())),
        &format!("{}.hello:main", answers.module_name),
        "project.scripts",
        report,
    );
    expect_str(
        project.and_then(|p| p.get("requires-python")),
        &format!(">={}", answers.python_version),
        "project.requires-python",
        report,
    );

    let dev = value
        .get("dependency-groups")
        .and_then(|g| g.get("dev"))
        .and_then(|d| d.as_array());

    match dev {
        Some(entries) => {
            let names: Vec<&str> = entries.iter().filter_map(|e| e.as_str()).collect();
            for (prefix, expected) in dev_group_expectations(answers) {
                let present = names.iter().any(|n| n.starts_with(prefix));
                if present != expected {
                    let detail = if expected {
                        format!("dev group has no {}* entry", prefix)
                    } else {
                        format!("dev group has a {}* entry but its toggle is off", prefix)
                    };
                    report.push("dev-group", detail);
                }
            }
        }
        None => report.push("dev-group", "dependency-groups.dev is missing".to_string()),
    }
}

fn expect_str(
    actual: Option<&toml::Value>,
    expected: &str,
    field: &'static str,
    report: &mut ContractReport,
) {
    match actual.and_then(|v| v.as_str()) {
        Some(value) if value == expected => {}
        Some(value) => report.push(
            field,
            format!("expected {:?}, found {:?}", expected, value),
        ),
        None => report.push(field, format!("expected {:?}, found nothing", expected)),
    }
}

fn check_dockerfile(project_dir: &Path, answers: &ResolvedAnswers, report: &mut ContractReport) {
    let expected = format!("FROM python:{}-slim-bookworm", answers.python_version);

    match fs::read_to_string(project_dir.join("Dockerfile")) {
        Ok(content) => {
            if !content.lines().any(|line| line == expected) {
                report.push("dockerfile", format!("missing line {:?}", expected));
            }
        }
        Err(e) => report.push("dockerfile", format!("unreadable: {}", e)),
    }
}

fn check_envrc(project_dir: &Path, report: &mut ContractReport) {
    const EXPECTED: &str = "VIRTUAL_ENV=\".venv\"\nlayout python\ndotenv_if_exists .env\n";

    match fs::read_to_string(project_dir.join(".envrc")) {
        Ok(content) => {
            if content != EXPECTED {
                report.push("envrc", format!("content is not the three expected lines, found {:?}", content));
            }
        }
        Err(e) => report.push("envrc", format!("unreadable: {}", e)),
    }
}

fn check_precommit_scrubbed(project_dir: &Path, report: &mut ContractReport) {
    match fs::read_to_string(project_dir.join(".pre-commit-config.yaml")) {
        Ok(content) => {
            if content.contains("commitizen") {
                report.push(
                    "precommit",
                    "mentions commitizen although use_commitizen is off".to_string(),
                );
            }
        }
        Err(e) => report.push("precommit", format!("unreadable: {}", e)),
    }
}

/// No file may keep an unsubstituted {{PLACEHOLDER}}
fn check_placeholders(project_dir: &Path, report: &mut ContractReport) {
    for entry in WalkDir::new(project_dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(|e| e.ok())
    {
        if !entry.path().is_file() {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(_) => continue,
        };

        let leftover = Variables::find_used_variables(&content);
        if !leftover.is_empty() {
            let rel = entry
                .path()
                .strip_prefix(project_dir)
                .unwrap_or(entry.path());
            report.push(
                "placeholders",
                format!("{} still contains {:?}", rel.display(), leftover),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold::{render_resolved, Answers, RenderOptions};
    use tempfile::TempDir;

    fn base_answers() -> Answers {
        Answers {
            project_name: Some("postmodern-python".to_string()),
            module_name: Some("postmodern".to_string()),
            description: Some("Example project scaffolded by tests".to_string()),
            user_name: Some("test user".to_string()),
            user_full_name: Some("Test User".to_string()),
            user_email: Some("user@example.com".to_string()),
            ..Answers::default()
        }
    }

    fn render_into(dir: &TempDir, answers: &Answers) -> (PathBuf, ResolvedAnswers) {
        let dest = dir.path().join("out");
        let resolved = answers.resolve().unwrap();
        let options = RenderOptions {
            force: false,
            init_git: false,
        };
        render_resolved(&resolved, &dest, &options).unwrap();
        (dest, resolved)
    }

    #[test]
    fn test_default_render_satisfies_contract() {
        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &base_answers());

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report.ok(), "findings: {:?}", report.findings);
    }

    #[test]
    fn test_toggle_matrix() {
        // (dockerfile, mkdocs, precommit, commitizen, direnv)
        let combos = [
            (true, true, true, true, true),
            (false, false, false, false, false),
            (true, false, false, false, false),
            (false, true, false, false, false),
            (false, false, true, false, false),
            (false, false, false, true, false),
            (false, false, false, false, true),
            (true, false, true, false, true),
        ];

        for (dockerfile, mkdocs, precommit, commitizen, direnv) in combos {
            let mut answers = base_answers();
            answers.include_dockerfile = Some(dockerfile);
            answers.include_mkdocs = Some(mkdocs);
            answers.include_precommit = Some(precommit);
            answers.use_commitizen = Some(commitizen);
            answers.include_direnv = Some(direnv);

            let dir = TempDir::new().unwrap();
            let (dest, resolved) = render_into(&dir, &answers);

            let report = verify_tree(&dest, &resolved).unwrap();
            assert!(
                report.ok(),
                "combo {:?} violated contract: {:?}",
                (dockerfile, mkdocs, precommit, commitizen, direnv),
                report.findings
            );
        }
    }

    #[test]
    fn test_derived_module_name_contract() {
        let mut answers = base_answers();
        answers.project_name = Some("My Awesome Project".to_string());
        answers.module_name = None;

        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &answers);

        assert!(dest.join("src/my-awesome-project").is_dir());
        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report.ok(), "findings: {:?}", report.findings);
    }

    #[test]
    fn test_invalid_python_version_still_satisfies_contract() {
        let mut answers = base_answers();
        answers.python_version = Some("invalid".to_string());
        answers.include_dockerfile = Some(true);

        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &answers);

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report.ok(), "findings: {:?}", report.findings);

        let pyproject = fs::read_to_string(dest.join("pyproject.toml")).unwrap();
        assert!(pyproject.contains("requires-python = \">=invalid\""));
    }

    #[test]
    fn test_detects_missing_file() {
        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &base_answers());

        fs::remove_file(dest.join(".pre-commit-config.yaml")).unwrap();

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report
            .findings
            .iter()
            .any(|f| f.check == "files" && f.detail.contains(".pre-commit-config.yaml")));
    }

    #[test]
    fn test_detects_leaked_toggle_file() {
        let mut answers = base_answers();
        answers.include_direnv = Some(false);

        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &answers);

        fs::write(dest.join(".envrc"), "layout python\n").unwrap();

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report
            .findings
            .iter()
            .any(|f| f.check == "files" && f.detail.contains(".envrc")));
    }

    #[test]
    fn test_detects_wrong_pyproject_field() {
        let dir = TempDir::new().unwrap();
        let (dest, mut resolved) = render_into(&dir, &base_answers());

        // Verify against answers the tree was not rendered from
        resolved.description = "Some other description".to_string();

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report
            .findings
            .iter()
            .any(|f| f.check == "project.description"));
    }

    #[test]
    fn test_detects_commitizen_leak_in_precommit() {
        let mut answers = base_answers();
        answers.use_commitizen = Some(false);

        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &answers);

        let path = dest.join(".pre-commit-config.yaml");
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("\n  # commitizen leftover\n");
        fs::write(&path, content).unwrap();

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report.findings.iter().any(|f| f.check == "precommit"));
    }

    #[test]
    fn test_detects_unsubstituted_placeholder() {
        let dir = TempDir::new().unwrap();
        let (dest, resolved) = render_into(&dir, &base_answers());

        fs::write(dest.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

        let report = verify_tree(&dest, &resolved).unwrap();
        assert!(report.findings.iter().any(|f| f.check == "placeholders"));
    }
}
