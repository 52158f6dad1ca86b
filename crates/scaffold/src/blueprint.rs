//! The bundled project blueprint
//!
//! Embedded template files plus the per-file conditions deciding which of
//! them a render emits. Both file content and relative path components go
//! through placeholder substitution, so the module directory under src/
//! follows the resolved module name.
//!
//! Toggle-dependent content lives in computed fragments (the dev
//! dependency group, the commitizen hook block) so a single template file
//! covers every toggle state.

use std::path::PathBuf;

use crate::answers::ResolvedAnswers;
use crate::vars::Variables;

const PYPROJECT: &str = include_str!("../templates/pyproject.toml");
const README: &str = include_str!("../templates/README.md");
const GITIGNORE: &str = include_str!("../templates/gitignore");
const MODULE_INIT: &str = include_str!("../templates/__init__.py");
const MODULE_HELLO: &str = include_str!("../templates/hello.py");
const TEST_IMPORT: &str = include_str!("../templates/test_import.py");
const PRECOMMIT: &str = include_str!("../templates/pre-commit-config.yaml");
const MKDOCS: &str = include_str!("../templates/mkdocs.yml");
const DOCS_INDEX: &str = include_str!("../templates/docs_index.md");
const DOCKERFILE: &str = include_str!("../templates/Dockerfile");
const DOCKERIGNORE: &str = include_str!("../templates/dockerignore");
const ENVRC: &str = include_str!("../templates/envrc");

/// Condition under which a template file is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum When {
    Always,
    Precommit,
    Mkdocs,
    Dockerfile,
    Direnv,
}

impl When {
    fn enabled(self, answers: &ResolvedAnswers) -> bool {
        match self {
            When::Always => true,
            When::Precommit => answers.include_precommit,
            When::Mkdocs => answers.include_mkdocs,
            When::Dockerfile => answers.include_dockerfile,
            When::Direnv => answers.include_direnv,
        }
    }
}

/// The file table: destination path pattern, template source, condition
const FILES: &[(&str, &str, When)] = &[
    ("pyproject.toml", PYPROJECT, When::Always),
    ("README.md", README, When::Always),
    (".gitignore", GITIGNORE, When::Always),
    ("src/{{MODULE_NAME}}/__init__.py", MODULE_INIT, When::Always),
    ("src/{{MODULE_NAME}}/hello.py", MODULE_HELLO, When::Always),
    ("tests/test_import.py", TEST_IMPORT, When::Always),
    (".pre-commit-config.yaml", PRECOMMIT, When::Precommit),
    ("mkdocs.yml", MKDOCS, When::Mkdocs),
    ("docs/index.md", DOCS_INDEX, When::Mkdocs),
    ("Dockerfile", DOCKERFILE, When::Dockerfile),
    (".dockerignore", DOCKERIGNORE, When::Dockerfile),
    (".envrc", ENVRC, When::Direnv),
];

/// A fully rendered file, ready to be written
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// Path relative to the project directory
    pub rel_path: PathBuf,
    /// Substituted file content
    pub content: String,
}

/// Build the variable set for a render, including computed fragments
pub fn variables(answers: &ResolvedAnswers) -> Variables {
    let mut vars = Variables::from_answers(answers);
    vars.set("DEV_DEPENDENCIES", &dev_dependency_lines(answers));
    vars.set("COMMITIZEN_HOOKS", commitizen_hooks(answers));
    vars
}

/// Render the blueprint into its planned file list
pub fn plan(answers: &ResolvedAnswers) -> Vec<PlannedFile> {
    let vars = variables(answers);

    FILES
        .iter()
        .filter(|(_, _, when)| when.enabled(answers))
        .map(|(path, source, _)| PlannedFile {
            rel_path: PathBuf::from(vars.substitute(path)),
            content: vars.substitute(source),
        })
        .collect()
}

/// The dev dependency group, one specifier per toggle-selected tool
fn dev_dependency_lines(answers: &ResolvedAnswers) -> String {
    let mut deps = vec!["pytest>=8.3"];

    if answers.include_precommit {
        deps.push("prek>=0.4");
    }
    if answers.use_commitizen {
        deps.push("commitizen>=4.4");
    }
    if answers.include_mkdocs {
        deps.push("mkdocs>=1.6");
        deps.push("mkdocs-material>=9.5");
    }

    deps.iter()
        .map(|dep| format!("    \"{}\",", dep))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The commitizen block of the pre-commit config, empty when disabled
fn commitizen_hooks(answers: &ResolvedAnswers) -> &'static str {
    if answers.use_commitizen {
        "\n  - repo: https://github.com/commitizen-tools/commitizen\n    rev: v4.4.1\n    hooks:\n      - id: commitizen\n        stages: [commit-msg]"
    } else {
        ""
    }
}
