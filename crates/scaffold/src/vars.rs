//! Template variable handling
//!
//! Provides variable substitution using {{PLACEHOLDER}} syntax.
//! Variables are replaced in both file content and relative path
//! components. Unknown placeholders are left as-is so they can be
//! reported instead of silently vanishing.

use chrono::Local;
use regex::Regex;
use std::collections::HashMap;

use crate::answers::ResolvedAnswers;

/// Template variables container
#[derive(Debug, Clone)]
pub struct Variables {
    /// Variable name -> value mapping
    vars: HashMap<String, String>,
}

impl Variables {
    /// Build the standard variable set from resolved answers
    pub fn from_answers(answers: &ResolvedAnswers) -> Self {
        let mut vars = HashMap::new();

        vars.insert("PROJECT_NAME".to_string(), answers.project_name.clone());
        vars.insert("MODULE_NAME".to_string(), answers.module_name.clone());
        vars.insert("DESCRIPTION".to_string(), answers.description.clone());
        vars.insert("AUTHOR_NAME".to_string(), answers.author_display_name());
        vars.insert(
            "AUTHOR_FULL_NAME".to_string(),
            answers.user_full_name.clone(),
        );
        vars.insert("AUTHOR_EMAIL".to_string(), answers.user_email.clone());
        vars.insert("PYTHON_VERSION".to_string(), answers.python_version.clone());
        vars.insert(
            "DATE".to_string(),
            Local::now().format("%Y-%m-%d").to_string(),
        );
        vars.insert("YEAR".to_string(), Local::now().format("%Y").to_string());

        Self { vars }
    }

    /// Set a variable value
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_uppercase(), value.to_string());
    }

    /// Get a variable value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.vars.get(&key.to_uppercase())
    }

    /// Replace all {{PLACEHOLDER}} patterns in a string
    pub fn substitute(&self, content: &str) -> String {
        let re = Regex::new(r"\{\{([A-Z_][A-Z0-9_]*)\}\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let key = &caps[1];
            self.vars
                .get(key)
                .cloned()
                .unwrap_or_else(|| format!("{{{{{}}}}}", key))
        })
        .to_string()
    }

    /// Find all variables used in a string
    pub fn find_used_variables(content: &str) -> Vec<String> {
        let re = Regex::new(r"\{\{([A-Z_][A-Z0-9_]*)\}\}").unwrap();

        let mut vars: Vec<String> = re
            .captures_iter(content)
            .map(|cap| cap[1].to_string())
            .collect();

        vars.sort();
        vars.dedup();
        vars
    }

    /// Get all defined variable names
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<_> = self.vars.keys().collect();
        names.sort();
        names
    }
}
