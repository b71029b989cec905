//! Declarative constraints attached to form fields.

pub mod patterns;

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::snapshot::FormSnapshot;

/// Compiled regex a field value must match.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub(crate) fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self.regex.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

type CheckFn = dyn Fn(&str, &FormSnapshot) -> bool + Send + Sync;

/// Caller-supplied predicate over a value and the whole snapshot.
#[derive(Clone)]
pub struct CustomCheck {
    check: Arc<CheckFn>,
    message: Option<String>,
}

impl CustomCheck {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str, &FormSnapshot) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            message: None,
        }
    }

    /// Set the message reported when the check fails.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn passes(&self, value: &str, snapshot: &FormSnapshot) -> bool {
        (self.check)(value, snapshot)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The second-stage check of a rule. A rule carries at most one.
#[derive(Debug, Clone)]
pub enum Refinement {
    /// Non-empty values must match; evaluated right after `required`.
    Pattern(Pattern),
    /// Evaluated last, after length and match checks.
    Custom(CustomCheck),
}

/// Constraint attached to one form field.
///
/// ## Example
///
/// ```rust
/// use dokira_forms::{patterns, FieldRule};
///
/// let rules = vec![
///     FieldRule::new("email").required().pattern(patterns::email()),
///     FieldRule::new("password").required().min_length(8),
///     FieldRule::new("password_confirm").required().matches("password"),
/// ];
/// # assert_eq!(rules.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub required: bool,
    pub min_length: Option<usize>,
    /// Id of the field whose value this one must equal.
    pub matches_field: Option<String>,
    pub refinement: Option<Refinement>,
}

impl FieldRule {
    /// An optional field with no constraints.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            required: false,
            min_length: None,
            matches_field: None,
            refinement: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replaces any custom check already set.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.refinement = Some(Refinement::Pattern(pattern));
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

    /// Replaces any pattern already set.
    pub fn custom<F>(self, check: F) -> Self
    where
        F: Fn(&str, &FormSnapshot) -> bool + Send + Sync + 'static,
    {
        self.check(CustomCheck::new(check))
    }

    pub fn custom_with_message<F>(self, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str, &FormSnapshot) -> bool + Send + Sync + 'static,
    {
        self.check(CustomCheck::new(check).with_message(message))
    }

    /// Attach an already built check. Replaces any pattern already set.
    pub fn check(mut self, check: CustomCheck) -> Self {
        self.refinement = Some(Refinement::Custom(check));
        self
    }

    pub fn pattern_ref(&self) -> Option<&Pattern> {
        match &self.refinement {
            Some(Refinement::Pattern(p)) => Some(p),
            _ => None,
        }
    }

    pub fn custom_ref(&self) -> Option<&CustomCheck> {
        match &self.refinement {
            Some(Refinement::Custom(c)) => Some(c),
            _ => None,
        }
    }
}
