//! Rule sets of the forms served by the Dokira web application.

use crate::error::SchemaError;
use crate::rules::patterns::PHONE_MIN_LENGTH;
use crate::schema::{CheckRegistry, Format, FormSchema, RuleSpec};
use crate::validator::FormValidator;

pub const LOGIN: &str = "login";
pub const SIGNUP: &str = "signup";
pub const PROFILE: &str = "profile";
pub const PRESCRIPTION: &str = "prescription";
pub const LIVE: &str = "live";

/// Minimum password length on account creation.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Names of every preset, in display order.
pub fn names() -> &'static [&'static str] {
    &[LOGIN, SIGNUP, PROFILE, PRESCRIPTION, LIVE]
}

/// Patient or physician sign-in.
pub fn login() -> FormSchema {
    FormSchema::new(
        LOGIN,
        vec![
            RuleSpec::new("email").required().format(Format::Email),
            RuleSpec::new("password").required(),
        ],
    )
}

/// Account creation.
pub fn signup() -> FormSchema {
    FormSchema::new(
        SIGNUP,
        vec![
            RuleSpec::new("email").required().format(Format::Email),
            RuleSpec::new("password")
                .required()
                .min_length(PASSWORD_MIN_LENGTH),
            RuleSpec::new("password_confirm")
                .required()
                .matches("password"),
            RuleSpec::new("telephone")
                .required()
                .format(Format::Phone)
                .min_length(PHONE_MIN_LENGTH),
        ],
    )
}

/// Physician settings page. The phone number may be left blank.
pub fn profile() -> FormSchema {
    FormSchema::new(
        PROFILE,
        vec![
            RuleSpec::new("prenom").required(),
            RuleSpec::new("nom").required(),
            RuleSpec::new("email").required().format(Format::Email),
            RuleSpec::new("telephone").check("optional_phone"),
        ],
    )
}

/// New prescription for a patient.
pub fn prescription() -> FormSchema {
    FormSchema::new(
        PRESCRIPTION,
        vec![
            RuleSpec::new("medicament").required(),
            RuleSpec::new("posologie").required(),
        ],
    )
}

/// Per-field checks run on blur and input, before the form is submitted.
///
/// Nothing is required here: an empty field is left alone until submission,
/// and a partly typed value is flagged only once it is malformed or too short.
/// Use with [`FormValidator::validate_field`].
pub fn live() -> FormSchema {
    FormSchema::new(
        LIVE,
        vec![
            RuleSpec::new("email").format(Format::Email),
            RuleSpec::new("password").check("optional_password"),
        ],
    )
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<FormSchema> {
    match name {
        LOGIN => Some(login()),
        SIGNUP => Some(signup()),
        PROFILE => Some(profile()),
        PRESCRIPTION => Some(prescription()),
        LIVE => Some(live()),
        _ => None,
    }
}

/// Build a preset's validator with the built-in checks.
pub fn validator(name: &str) -> Result<FormValidator, SchemaError> {
    preset(name)
        .ok_or_else(|| SchemaError::UnknownForm(name.to_string()))?
        .to_validator(&CheckRegistry::with_builtins())
}
