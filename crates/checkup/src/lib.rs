//! checkup - Verification for rendered pystamp projects
//!
//! Two layers of verification over a rendered project tree:
//!
//! - structural: the render contract. File presence per toggle, the
//!   pyproject.toml field values, dependency-group membership, exact
//!   content for the files that specify it.
//! - external: the tree treated as an independent project. The package
//!   builder must produce a wheel and the generated test suite must pass.

pub mod external;
pub mod structural;

pub use external::{check_build, check_tests, run_check, CheckResult};
pub use structural::{verify_tree, ContractReport, Finding};
