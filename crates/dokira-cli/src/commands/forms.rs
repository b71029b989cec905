//! Forms command - inspect the preset rule sets

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use dokira_forms::forms as presets;

/// Arguments for the `forms` command
#[derive(Args, Debug)]
pub struct FormsArgs {
    /// Preset to print as a rule-set file
    pub name: Option<String>,
}

/// List presets, or print one as JSON
pub fn forms(args: FormsArgs) -> Result<()> {
    match args.name {
        Some(name) => {
            let schema = presets::preset(&name).with_context(|| format!("unknown form `{name}`"))?;
            println!("{}", schema.to_json_pretty()?);
        }
        None => {
            for name in presets::names() {
                let Some(schema) = presets::preset(name) else {
                    continue;
                };
                let fields: Vec<&str> = schema.rules.iter().map(|r| r.field.as_str()).collect();
                println!("{:<14} {}", style(name).bold(), style(fields.join(", ")).dim());
            }
        }
    }
    Ok(())
}
