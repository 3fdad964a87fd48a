//! Working-tree access: shallow clones and running a linter over them.

mod git;
mod lint;
mod workdir;

pub use git::shallow_clone;
pub use lint::{LintSummary, parse_lint_report, run_lint};
pub use workdir::WorkDir;

const LOG_TARGET: &str = "  codebase";
