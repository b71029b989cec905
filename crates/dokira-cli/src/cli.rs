//! CLI argument parsing

use crate::commands::{self, CheckArgs, FormsArgs, Outcome};
use clap::{Parser, Subcommand};

/// Dokira form checker - validate field values against a form's rules
#[derive(Parser, Debug)]
#[command(name = "dokira")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log validation details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate values against a preset or a rule-set file
    Check(CheckArgs),

    /// List the preset forms, or print one as a rule-set file
    Forms(FormsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<Outcome> {
        match self.command {
            Commands::Check(args) => commands::check(args),
            Commands::Forms(args) => commands::forms(args).map(|()| Outcome::Valid),
        }
    }
}
