//! scaffold - Project scaffolding for pystamp
//!
//! Renders a modern uv-based Python project skeleton from an answer set:
//! a pyproject.toml with a dev dependency group, a src/ module with a
//! hello entry point, a smoke test, and optional pre-commit, mkdocs,
//! Docker, and direnv files.
//!
//! The answer set decides everything. Required answers (project name,
//! description, author identity) must be present; the module name defaults
//! to the slugified project name; five boolean toggles switch the optional
//! file groups on and off independently.

pub mod answers;
pub mod blueprint;
pub mod render;
pub mod vars;

pub use answers::{slugify, Answers, AnswersError, ResolvedAnswers};
pub use blueprint::{plan, PlannedFile};
pub use render::{render, render_resolved, RenderOptions, RenderedProject};
pub use vars::Variables;
