//! Pystamp Core - Shared functionality for pystamp tools
//!
//! Every pystamp tool shells out to external collaborators (git, uv,
//! pytest). This crate holds the common plumbing for doing that.

pub mod command;

pub use command::{run_in_dir, tool_on_path, CommandOutput};
