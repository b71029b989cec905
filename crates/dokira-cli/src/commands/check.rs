//! Check command - validate values against a form

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::{style, Emoji};
use dokira_forms::{forms, CheckRegistry, FormSchema, FormSnapshot, FrenchMessages, ValidationResult};
use std::path::PathBuf;

use super::Outcome;

static CHECK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "x ");

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Preset form to validate against
    #[arg(short, long, conflicts_with = "schema", required_unless_present = "schema")]
    pub form: Option<String>,

    /// Rule-set JSON file to validate against
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// JSON object of field values
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Field value as `field=value`; overrides --values
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Message language
    #[arg(long, value_enum, default_value_t = Lang::En)]
    pub lang: Lang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per failing field
    Text,
    /// The validation result as JSON
    Json,
    /// The HTTP error envelope (empty object when valid)
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    En,
    Fr,
}

/// Validate the given values and print the outcome
pub fn check(args: CheckArgs) -> Result<Outcome> {
    let schema = match (&args.form, &args.schema) {
        (Some(name), _) => {
            forms::preset(name).with_context(|| {
                format!(
                    "unknown form `{name}` (available: {})",
                    forms::names().join(", ")
                )
            })?
        }
        (None, Some(path)) => FormSchema::from_path(path)?,
        (None, None) => anyhow::bail!("either --form or --schema is required"),
    };
    let validator = schema.to_validator(&CheckRegistry::with_builtins())?;

    let snapshot = read_snapshot(&args)?;
    tracing::debug!(form = %validator.name(), fields = snapshot.len(), "checking snapshot");

    let mut result = validator.validate(&snapshot);
    if args.lang == Lang::Fr {
        result = result.localize(&FrenchMessages);
    }

    print_result(validator.name(), &result, args.format)?;

    Ok(if result.is_valid() {
        Outcome::Valid
    } else {
        Outcome::Invalid
    })
}

fn read_snapshot(args: &CheckArgs) -> Result<FormSnapshot> {
    let base = match &args.values {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<FormSnapshot>(&json)
                .with_context(|| format!("{} is not a JSON object of strings", path.display()))?
        }
        None => FormSnapshot::new(),
    };
    Ok(base.merged(FormSnapshot::from_pairs(&args.set)?))
}

fn print_result(form: &str, result: &ValidationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Api if result.is_valid() => println!("{{}}"),
        OutputFormat::Api => println!("{}", serde_json::to_string_pretty(&result.to_api_error())?),
        OutputFormat::Text if result.is_valid() => {
            println!("{} {} {}", CHECK, style(form).bold(), style("is valid").green());
        }
        OutputFormat::Text => {
            println!(
                "{} {} {}",
                ERROR,
                style(form).bold(),
                style(format!("has {} invalid field(s)", result.len())).red()
            );
            for (field, error) in result.field_errors() {
                println!("  {}: {}", style(field).yellow(), error.message);
            }
        }
    }
    Ok(())
}
