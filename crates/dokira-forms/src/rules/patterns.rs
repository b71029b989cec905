//! Built-in patterns shared by the Dokira forms.

use regex::Regex;
use std::sync::OnceLock;

use super::Pattern;

/// `local@domain.tld` with no whitespace or extra `@` in any part.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Digits, whitespace, `+`, `-`, `(` and `)` only.
pub const PHONE_PATTERN: &str = r"^[0-9\s+\-()]+$";

/// Shortest accepted phone number, in characters.
pub const PHONE_MIN_LENGTH: usize = 10;

// Pre-compiled regex patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN compiles"))
}

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("PHONE_PATTERN compiles"))
}

/// The email pattern, ready to attach to a rule.
pub fn email() -> Pattern {
    Pattern::from_regex(email_regex().clone())
}

/// The phone pattern, ready to attach to a rule.
///
/// The pattern alone does not enforce [`PHONE_MIN_LENGTH`]; pair it with
/// `min_length` on the rule.
pub fn phone() -> Pattern {
    Pattern::from_regex(phone_regex().clone())
}

pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Phone charset and the minimum length together.
pub fn is_phone(value: &str) -> bool {
    phone_regex().is_match(value) && value.chars().count() >= PHONE_MIN_LENGTH
}
