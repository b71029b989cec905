//! Rule sets as data, so forms can be described in configuration files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::SchemaError;
use crate::forms::PASSWORD_MIN_LENGTH;
use crate::rules::{patterns, CustomCheck, FieldRule, Pattern};
use crate::validator::FormValidator;

/// Built-in pattern a rule can refer to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Email,
    Phone,
}

impl Format {
    pub fn pattern(self) -> Pattern {
        match self {
            Format::Email => patterns::email(),
            Format::Phone => patterns::phone(),
        }
    }
}

/// Serializable form of a [`FieldRule`].
///
/// `pattern` (a raw regex) and `format` (a built-in one) both select the
/// pattern refinement, so they are mutually exclusive with each other and with
/// `check`, which names a custom check in a [`CheckRegistry`].
///
/// ```json
/// { "field": "telephone", "required": true, "format": "phone", "min_length": 10 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub field: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Message for a failing custom check; overrides the registry's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn matches(mut self, other: impl Into<String>) -> Self {
        self.matches_field = Some(other.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn check(mut self, name: impl Into<String>) -> Self {
        self.check = Some(name.into());
        self
    }

    /// Compile into a rule, resolving `check` through `registry`.
    pub fn to_rule(&self, registry: &CheckRegistry) -> Result<FieldRule, SchemaError> {
        let mut rule = FieldRule::new(self.field.clone());
        rule.required = self.required;
        rule.min_length = self.min_length;
        rule.matches_field = self.matches_field.clone();

        if self.message.is_some() && self.check.is_none() {
            return Err(SchemaError::OrphanMessage {
                field: self.field.clone(),
            });
        }

        let has_pattern = self.pattern.is_some() || self.format.is_some();
        if has_pattern && self.check.is_some() {
            return Err(SchemaError::ConflictingRefinement {
                field: self.field.clone(),
            });
        }

        match (&self.pattern, self.format) {
            (Some(_), Some(_)) => {
                return Err(SchemaError::ConflictingPattern {
                    field: self.field.clone(),
                })
            }
            (Some(raw), None) => {
                let pattern = Pattern::new(raw).map_err(|source| SchemaError::InvalidPattern {
                    field: self.field.clone(),
                    source,
                })?;
                rule = rule.pattern(pattern);
            }
            (None, Some(format)) => rule = rule.pattern(format.pattern()),
            (None, None) => {}
        }

        if let Some(name) = &self.check {
            let mut check = registry
                .get(name)
                .cloned()
                .ok_or_else(|| SchemaError::UnknownCheck {
                    field: self.field.clone(),
                    check: name.clone(),
                })?;
            if let Some(message) = &self.message {
                check = check.with_message(message.clone());
            }
            rule = rule.check(check);
        }

        Ok(rule)
    }
}

/// A named list of rule specs, as stored in a rule-set file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSchema {
    pub name: String,
    pub rules: Vec<RuleSpec>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>, rules: Vec<RuleSpec>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a rule set from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let schema = Self::from_json(&json)?;
        tracing::debug!(form = %schema.name, path = %path.display(), "loaded rule set");
        Ok(schema)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compile every rule, failing on the first bad one.
    pub fn to_validator(&self, registry: &CheckRegistry) -> Result<FormValidator, SchemaError> {
        let rules = self
            .rules
            .iter()
            .map(|spec| spec.to_rule(registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FormValidator::new(self.name.clone(), rules))
    }
}

/// Named custom checks that rule specs can refer to.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<String, CustomCheck>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the checks used by the Dokira forms:
    ///
    /// - `optional_phone`: empty, or a phone number of at least 10 characters
    /// - `optional_email`: empty, or an email address
    /// - `optional_password`: empty, or at least
    ///   [`PASSWORD_MIN_LENGTH`](crate::forms::PASSWORD_MIN_LENGTH) characters
    pub fn with_builtins() -> Self {
        let min = PASSWORD_MIN_LENGTH;
        Self::new()
            .register(
                "optional_phone",
                CustomCheck::new(|value, _| value.is_empty() || patterns::is_phone(value))
                    .with_message("field has invalid format"),
            )
            .register(
                "optional_email",
                CustomCheck::new(|value, _| value.is_empty() || patterns::is_email(value))
                    .with_message("field has invalid format"),
            )
            .register(
                "optional_password",
                CustomCheck::new(move |value, _| value.is_empty() || value.chars().count() >= min)
                    .with_message(format!("field must be at least {min} characters")),
            )
    }

    /// Add a check, replacing one registered under the same name.
    pub fn register(mut self, name: impl Into<String>, check: CustomCheck) -> Self {
        self.checks.insert(name.into(), check);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CustomCheck> {
        self.checks.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
