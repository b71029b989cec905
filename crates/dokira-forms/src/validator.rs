//! Pure validation of a snapshot against a rule set.

use crate::error::{FieldError, ValidationResult};
use crate::rules::{FieldRule, Refinement};
use crate::snapshot::FormSnapshot;

pub const REQUIRED_MESSAGE: &str = "field is required";
pub const PATTERN_MESSAGE: &str = "field has invalid format";
pub const MATCH_MESSAGE: &str = "fields do not match";
pub const CUSTOM_MESSAGE: &str = "field is invalid";

/// Apply `rules` to `snapshot`.
///
/// Each rule reports at most one failure, the first one hit in this order:
/// required, pattern, minimum length, match, custom check. A field named by
/// several rules keeps the failure of the earliest failing rule.
///
/// No I/O and no shared state: the same arguments always give the same result.
pub fn validate(rules: &[FieldRule], snapshot: &FormSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();

    for rule in rules {
        if let Some(error) = check_rule(rule, snapshot) {
            tracing::trace!(field = %rule.field, code = %error.code, "field failed validation");
            result.record(rule.field.clone(), error);
        }
    }

    result
}

/// Apply only the rules naming `field`, as on blur or input.
///
/// Same precedence as [`validate`]; returns the failure that `validate` would
/// record for this field, or `None` when the field passes. Other fields of the
/// snapshot are read only by match and custom checks.
pub fn validate_field(
    rules: &[FieldRule],
    field: &str,
    snapshot: &FormSnapshot,
) -> Option<FieldError> {
    rules
        .iter()
        .filter(|rule| rule.field == field)
        .find_map(|rule| check_rule(rule, snapshot))
}

fn check_rule(rule: &FieldRule, snapshot: &FormSnapshot) -> Option<FieldError> {
    let value = snapshot.get(&rule.field);

    if rule.required && value.trim().is_empty() {
        return Some(FieldError::new("required", REQUIRED_MESSAGE));
    }

    if let Some(Refinement::Pattern(pattern)) = &rule.refinement {
        if !value.is_empty() && !pattern.is_match(value) {
            return Some(
                FieldError::new("pattern", PATTERN_MESSAGE).param("pattern", pattern.as_str()),
            );
        }
    }

    if let Some(min) = rule.min_length {
        let len = value.chars().count();
        if len < min {
            return Some(
                FieldError::new("length", format!("field must be at least {min} characters"))
                    .param("min", min)
                    .param("actual", len),
            );
        }
    }

    if let Some(other) = &rule.matches_field {
        if value != snapshot.get(other) {
            return Some(FieldError::new("match", MATCH_MESSAGE).param("other", other));
        }
    }

    if let Some(Refinement::Custom(check)) = &rule.refinement {
        if !check.passes(value, snapshot) {
            let message = check.message().unwrap_or(CUSTOM_MESSAGE);
            return Some(FieldError::new("custom", message));
        }
    }

    None
}

/// The static rule set of one form.
///
/// ## Example
///
/// ```rust
/// use dokira_forms::{patterns, FieldRule, FormSnapshot, FormValidator};
///
/// let login = FormValidator::new(
///     "login",
///     vec![
///         FieldRule::new("email").required().pattern(patterns::email()),
///         FieldRule::new("password").required(),
///     ],
/// );
///
/// let result = login.validate(&FormSnapshot::new().with("email", "a@b.com"));
/// assert!(!result.is_valid());
/// assert_eq!(result.message("password"), Some("field is required"));
/// ```
#[derive(Debug, Clone)]
pub struct FormValidator {
    name: String,
    rules: Vec<FieldRule>,
}

impl FormValidator {
    pub fn new(name: impl Into<String>, rules: Vec<FieldRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate a snapshot of this form.
    pub fn validate(&self, snapshot: &FormSnapshot) -> ValidationResult {
        let result = validate(&self.rules, snapshot);
        tracing::debug!(
            form = %self.name,
            rules = self.rules.len(),
            errors = result.len(),
            "form validated"
        );
        result
    }

    /// Validate one field of this form.
    pub fn validate_field(&self, field: &str, snapshot: &FormSnapshot) -> Option<FieldError> {
        let error = validate_field(&self.rules, field, snapshot);
        tracing::trace!(form = %self.name, field, failed = error.is_some(), "field validated");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::patterns;

    #[test]
    fn empty_rule_set_is_valid() {
        let result = validate(&[], &FormSnapshot::new().with("x", "y"));
        assert!(result.is_valid());
    }

    #[test]
    fn whitespace_only_fails_required() {
        let rules = [FieldRule::new("nom").required()];
        let result = validate(&rules, &FormSnapshot::new().with("nom", "   "));
        assert_eq!(result.message("nom"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn optional_empty_value_skips_pattern() {
        let rules = [FieldRule::new("email").pattern(patterns::email())];
        assert!(validate(&rules, &FormSnapshot::new()).is_valid());
    }

    #[test]
    fn optional_empty_value_still_checks_length() {
        let rules = [FieldRule::new("password").min_length(8)];
        let result = validate(&rules, &FormSnapshot::new());
        assert_eq!(result.get("password").unwrap().code, "length");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rules = [FieldRule::new("nom").min_length(5)];
        let result = validate(&rules, &FormSnapshot::new().with("nom", "Éloïse"));
        assert!(result.is_valid());
        let result = validate(&rules, &FormSnapshot::new().with("nom", "Zoé"));
        assert_eq!(
            result.message("nom"),
            Some("field must be at least 5 characters")
        );
    }

    #[test]
    fn required_check_trims_but_length_does_not() {
        let rules = [FieldRule::new("code").required().min_length(4)];
        let result = validate(&rules, &FormSnapshot::new().with("code", " ab "));
        assert!(result.is_valid());
    }

    #[test]
    fn match_against_missing_field_compares_with_empty() {
        let rules = [FieldRule::new("confirm").matches("password")];
        assert!(validate(&rules, &FormSnapshot::new()).is_valid());
        let result = validate(&rules, &FormSnapshot::new().with("confirm", "x"));
        assert_eq!(result.message("confirm"), Some(MATCH_MESSAGE));
        assert_eq!(result.get("confirm").unwrap().params["other"], "password");
    }

    #[test]
    fn custom_check_runs_last() {
        let rules = [FieldRule::new("dose")
            .min_length(2)
            .custom_with_message(|v, _| v.parse::<u32>().is_ok(), "dose must be a number")];

        let result = validate(&rules, &FormSnapshot::new().with("dose", "x"));
        assert_eq!(result.get("dose").unwrap().code, "length");

        let result = validate(&rules, &FormSnapshot::new().with("dose", "xx"));
        assert_eq!(result.message("dose"), Some("dose must be a number"));

        assert!(validate(&rules, &FormSnapshot::new().with("dose", "12")).is_valid());
    }

    #[test]
    fn custom_check_without_message_uses_fallback() {
        let rules = [FieldRule::new("x").custom(|_, _| false)];
        let result = validate(&rules, &FormSnapshot::new());
        assert_eq!(result.message("x"), Some(CUSTOM_MESSAGE));
    }

    #[test]
    fn earliest_rule_wins_for_repeated_field() {
        let rules = [
            FieldRule::new("email").required(),
            FieldRule::new("email").custom_with_message(|_, _| false, "later"),
        ];
        let result = validate(&rules, &FormSnapshot::new());
        assert_eq!(result.message("email"), Some(REQUIRED_MESSAGE));

        let result = validate(&rules, &FormSnapshot::new().with("email", "a@b.com"));
        assert_eq!(result.message("email"), Some("later"));
    }

    #[test]
    fn field_validation_matches_form_validation() {
        let rules = [
            FieldRule::new("password").required().min_length(8),
            FieldRule::new("password_confirm").required().matches("password"),
        ];
        let snapshot = FormSnapshot::new()
            .with("password", "abc")
            .with("password_confirm", "abd");
        let whole = validate(&rules, &snapshot);

        for field in ["password", "password_confirm"] {
            assert_eq!(validate_field(&rules, field, &snapshot).as_ref(), whole.get(field));
        }
        assert!(validate_field(&rules, "email", &snapshot).is_none());
    }

    #[test]
    fn field_validation_keeps_earliest_rule() {
        let rules = [
            FieldRule::new("email").required(),
            FieldRule::new("nom").required(),
            FieldRule::new("email").custom_with_message(|_, _| false, "later"),
        ];
        let error = validate_field(&rules, "email", &FormSnapshot::new()).unwrap();
        assert_eq!(error.code, "required");

        let snapshot = FormSnapshot::new().with("email", "a@b.com");
        assert_eq!(validate_field(&rules, "email", &snapshot).unwrap().message, "later");
    }

    #[test]
    fn form_validator_delegates() {
        let form = FormValidator::new("prescription", vec![FieldRule::new("medicament").required()]);
        assert_eq!(form.name(), "prescription");
        assert_eq!(form.rules().len(), 1);
        assert!(!form.validate(&FormSnapshot::new()).is_valid());
    }
}
