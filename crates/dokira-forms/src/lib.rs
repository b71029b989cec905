//! # Dokira Forms
//!
//! Client-side form validation for the Dokira medical platform. A form is
//! described once as an ordered list of [`FieldRule`]s; every validation
//! attempt captures a fresh [`FormSnapshot`] and produces a
//! [`ValidationResult`] that the view layer renders and then drops.
//!
//! ## Example
//!
//! ```rust
//! use dokira_forms::prelude::*;
//!
//! let rules = vec![
//!     FieldRule::new("email").required().pattern(patterns::email()),
//!     FieldRule::new("password").required().min_length(8),
//!     FieldRule::new("password_confirm").required().matches("password"),
//! ];
//!
//! let snapshot = FormSnapshot::new()
//!     .with("email", "not-an-email")
//!     .with("password", "abc")
//!     .with("password_confirm", "abc");
//!
//! let result = validate(&rules, &snapshot);
//! assert!(!result.is_valid());
//! assert_eq!(result.message("email"), Some("field has invalid format"));
//! assert_eq!(result.message("password"), Some("field must be at least 8 characters"));
//! assert_eq!(result.message("password_confirm"), None);
//! ```
//!
//! ## Rule evaluation
//!
//! Each rule reports at most one failure, checked in this order:
//!
//! 1. `required` - the trimmed value is empty
//! 2. `pattern` - a non-empty value does not match
//! 3. `min_length` - fewer characters than the minimum
//! 4. `matches_field` - differs from the referenced field
//! 5. custom check - the predicate returns false
//!
//! ## Error Format
//!
//! [`ValidationResult::to_api_error`] produces the envelope returned to HTTP
//! clients:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": [
//!       {"field": "email", "code": "pattern", "message": "field has invalid format"}
//!     ]
//!   }
//! }
//! ```

mod error;
pub mod forms;
mod rules;
mod schema;
mod snapshot;
mod surface;
mod validator;


pub use error::{
    ApiValidationError, ErrorBody, FieldError, FieldErrorResponse, FrenchMessages, SchemaError,
    SnapshotError, SubmitError, Translator, ValidationResult,
};
pub use rules::{patterns, CustomCheck, FieldRule, Pattern, Refinement};
pub use schema::{CheckRegistry, Format, FormSchema, RuleSpec};
pub use snapshot::FormSnapshot;
pub use surface::{validate_and_submit, RenderSurface, Submitter};
pub use validator::{
    validate, validate_field, FormValidator, CUSTOM_MESSAGE, MATCH_MESSAGE, PATTERN_MESSAGE,
    REQUIRED_MESSAGE,
};

// Re-exported so implementors of `Submitter` need no direct dependency.
pub use async_trait::async_trait;

/// Prelude module for form validation
pub mod prelude {
    pub use crate::error::{FieldError, SubmitError, Translator, ValidationResult};
    pub use crate::rules::{patterns, CustomCheck, FieldRule, Pattern};
    pub use crate::schema::{CheckRegistry, FormSchema, RuleSpec};
    pub use crate::snapshot::FormSnapshot;
    pub use crate::surface::{validate_and_submit, RenderSurface, Submitter};
    pub use crate::validator::{validate, validate_field, FormValidator};
    pub use async_trait::async_trait;
}
