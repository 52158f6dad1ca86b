//! Answer set handling
//!
//! An answer set is the input configuration for a single render: project
//! identity, author info, the Python version, and the toggles controlling
//! optional file groups. Answers arrive partially filled (from a JSON file
//! or CLI flags) and are resolved into a complete set before rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer-resolution errors
#[derive(Error, Debug)]
pub enum AnswersError {
    #[error("Missing required answer: {0}")]
    MissingField(&'static str),
}

/// A raw, possibly incomplete answer set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub project_name: Option<String>,
    pub module_name: Option<String>,
    pub description: Option<String>,
    pub user_name: Option<String>,
    pub user_full_name: Option<String>,
    pub user_email: Option<String>,
    pub python_version: Option<String>,
    pub include_precommit: Option<bool>,
    pub use_commitizen: Option<bool>,
    pub include_mkdocs: Option<bool>,
    pub include_dockerfile: Option<bool>,
    pub include_direnv: Option<bool>,
}

/// A fully resolved answer set, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAnswers {
    pub project_name: String,
    pub module_name: String,
    pub description: String,
    pub user_name: String,
    pub user_full_name: String,
    pub user_email: String,
    pub python_version: String,
    pub include_precommit: bool,
    pub use_commitizen: bool,
    pub include_mkdocs: bool,
    pub include_dockerfile: bool,
    pub include_direnv: bool,
}

impl Answers {
    /// Resolve defaults and validate required fields
    ///
    /// The module name falls back to the slugified project name; an
    /// explicitly supplied module name always wins, whatever it looks
    /// like. Values are never validated semantically: a python_version of
    /// "invalid" resolves fine and renders verbatim.
    pub fn resolve(&self) -> Result<ResolvedAnswers, AnswersError> {
        let project_name = required(&self.project_name, "project_name")?;
        let description = required(&self.description, "description")?;
        let user_name = required(&self.user_name, "user_name")?;
        let user_full_name = required(&self.user_full_name, "user_full_name")?;
        let user_email = required(&self.user_email, "user_email")?;

        let module_name = match self.module_name.as_deref() {
            Some(explicit) if !explicit.trim().is_empty() => explicit.to_string(),
            _ => slugify(&project_name),
        };

        Ok(ResolvedAnswers {
            project_name,
            module_name,
            description,
            user_name,
            user_full_name,
            user_email,
            python_version: self
                .python_version
                .clone()
                .unwrap_or_else(|| "3.13".to_string()),
            include_precommit: self.include_precommit.unwrap_or(true),
            use_commitizen: self.use_commitizen.unwrap_or(true),
            include_mkdocs: self.include_mkdocs.unwrap_or(false),
            include_dockerfile: self.include_dockerfile.unwrap_or(false),
            include_direnv: self.include_direnv.unwrap_or(false),
        })
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, AnswersError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.clone()),
        _ => Err(AnswersError::MissingField(field)),
    }
}

impl ResolvedAnswers {
    /// Author display name as it appears in pyproject authors
    pub fn author_display_name(&self) -> String {
        title_case(&self.user_name)
    }
}

/// Derive a module name from a project name
///
/// Lowercases, collapses each whitespace run into a single hyphen, and
/// leaves every other character untouched.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_gap = false;

    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            pending_gap = true;
            continue;
        }
        if pending_gap {
            slug.push('-');
            pending_gap = false;
        }
        for lower in ch.to_lowercase() {
            slug.push(lower);
        }
    }

    slug
}

/// Title-case a name: first letter of each word upper, the rest lower
///
/// Word boundaries are non-alphabetic characters, matching how the author
/// display name has always been stored.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut boundary = true;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("My Awesome Project"), "my-awesome-project");
        assert_eq!(slugify("Tabs\tand   runs"), "tabs-and-runs");
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn test_slugify_keeps_other_characters() {
        assert_eq!(slugify("Already-Hyphenated"), "already-hyphenated");
        assert_eq!(slugify("dots.and_underscores"), "dots.and_underscores");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("My Awesome Project");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("test user"), "Test User");
        assert_eq!(title_case("ALL CAPS"), "All Caps");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = base_answers().resolve().unwrap();

        assert_eq!(resolved.python_version, "3.13");
        assert!(resolved.include_precommit);
        assert!(resolved.use_commitizen);
        assert!(!resolved.include_mkdocs);
        assert!(!resolved.include_dockerfile);
        assert!(!resolved.include_direnv);
    }

    #[test]
    fn test_explicit_module_name_wins() {
        let resolved = base_answers().resolve().unwrap();
        assert_eq!(resolved.module_name, "postmodern");

        let mut answers = base_answers();
        answers.module_name = Some("odd.name!".to_string());
        assert_eq!(answers.resolve().unwrap().module_name, "odd.name!");
    }

    #[test]
    fn test_module_name_derived_when_absent() {
        let mut answers = base_answers();
        answers.project_name = Some("My Awesome Project".to_string());
        answers.module_name = None;

        let resolved = answers.resolve().unwrap();
        assert_eq!(resolved.module_name, "my-awesome-project");
    }

    #[test]
    fn test_blank_module_name_falls_back() {
        let mut answers = base_answers();
        answers.module_name = Some("  ".to_string());

        let resolved = answers.resolve().unwrap();
        assert_eq!(resolved.module_name, "postmodern-python");
    }

    #[test]
    fn test_missing_required_field() {
        let mut answers = base_answers();
        answers.user_email = None;

        let err = answers.resolve().unwrap_err();
        assert!(err.to_string().contains("user_email"));
    }

    #[test]
    fn test_invalid_python_version_passes_through() {
        let mut answers = base_answers();
        answers.python_version = Some("invalid".to_string());

        let resolved = answers.resolve().unwrap();
        assert_eq!(resolved.python_version, "invalid");
    }

    #[test]
    fn test_author_display_name_is_title_cased() {
        let resolved = base_answers().resolve().unwrap();
        assert_eq!(resolved.author_display_name(), "Test User");
    }

    #[test]
    fn test_answers_deserialize_from_json() {
        let answers: Answers = serde_json::from_str(
            r#"{"project_name": "demo", "include_direnv": true}"#,
        )
        .unwrap();

        assert_eq!(answers.project_name.as_deref(), Some("demo"));
        assert_eq!(answers.include_direnv, Some(true));
        assert!(answers.module_name.is_none());
    }
}
