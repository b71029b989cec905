//! CLI commands

mod check;
mod forms;

pub use check::{check, CheckArgs};
pub use forms::{forms, FormsArgs};

/// What the process exit code should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}
