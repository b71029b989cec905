//! Validation outcomes and the error types of the surrounding plumbing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Trait for translating field error messages.
pub trait Translator {
    /// Translate a field error message.
    ///
    /// # Arguments
    ///
    /// * `code` - The failure code (e.g., "required", "length")
    /// * `field` - The field id
    /// * `params` - Parameters recorded with the failure
    fn translate(
        &self,
        code: &str,
        field: &str,
        params: &BTreeMap<String, serde_json::Value>,
    ) -> Option<String>;
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// The failure code: "required", "pattern", "length", "match" or "custom"
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Parameters of the violated constraint (e.g., `min` for length)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter to the error.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Outcome of applying a rule set to a snapshot.
///
/// The result is valid exactly when no field failed; validity is derived from
/// the error map rather than stored next to it. Serializes as
/// `{"valid": bool, "field_errors": {field: FieldError}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    field_errors: BTreeMap<String, FieldError>,
}

#[derive(Serialize, Deserialize)]
struct ResultRepr {
    valid: bool,
    #[serde(default)]
    field_errors: BTreeMap<String, FieldError>,
}

impl ValidationResult {
    /// A passing result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field` unless one is already recorded.
    ///
    /// Returns `false` when the field already had a failure.
    pub fn record(&mut self, field: impl Into<String>, error: FieldError) -> bool {
        match self.field_errors.entry(field.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(error);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// `true` iff no field failed.
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Failures keyed by field id.
    pub fn field_errors(&self) -> &BTreeMap<String, FieldError> {
        &self.field_errors
    }

    /// Failure recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.field_errors.get(field)
    }

    /// Message recorded for `field`, if any.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(|e| e.message.as_str())
    }

    /// Field id to message, the shape a view layer needs.
    pub fn messages(&self) -> BTreeMap<&str, &str> {
        self.field_errors
            .iter()
            .map(|(field, e)| (field.as_str(), e.message.as_str()))
            .collect()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.field_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Ids of the failing fields, in id order.
    pub fn field_names(&self) -> Vec<&str> {
        self.field_errors.keys().map(String::as_str).collect()
    }

    /// Convert to Result - Ok if valid, Err otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Rewrite messages through a translator, keeping codes and params.
    ///
    /// Failures the translator does not know keep their message.
    pub fn localize<T: Translator + ?Sized>(&self, translator: &T) -> Self {
        let field_errors = self
            .field_errors
            .iter()
            .map(|(field, e)| {
                let message = translator
                    .translate(&e.code, field, &e.params)
                    .unwrap_or_else(|| e.message.clone());
                (
                    field.clone(),
                    FieldError {
                        code: e.code.clone(),
                        message,
                        params: e.params.clone(),
                    },
                )
            })
            .collect();

        Self { field_errors }
    }

    /// Convert to the API error envelope returned to HTTP clients.
    pub fn to_api_error(&self) -> ApiValidationError {
        let fields = self
            .field_errors
            .iter()
            .map(|(field, e)| FieldErrorResponse {
                field: field.clone(),
                code: e.code.clone(),
                message: e.message.clone(),
                params: if e.params.is_empty() {
                    None
                } else {
                    Some(e.params.clone())
                },
            })
            .collect();

        ApiValidationError {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: "Validation failed".to_string(),
                fields,
            },
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Validation passed")
        } else {
            write!(f, "Validation failed: {} field error(s)", self.len())
        }
    }
}

impl std::error::Error for ValidationResult {}

impl Serialize for ValidationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ResultRepr {
            valid: self.is_valid(),
            field_errors: self.field_errors.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = ResultRepr::deserialize(deserializer)?;
        if repr.valid != repr.field_errors.is_empty() {
            return Err(serde::de::Error::custom(
                "`valid` must be true exactly when `field_errors` is empty",
            ));
        }
        Ok(Self {
            field_errors: repr.field_errors,
        })
    }
}

/// API response format for validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiValidationError {
    pub error: ErrorBody,
}

/// Error body in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub fields: Vec<FieldErrorResponse>,
}

/// Single field error in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, serde_json::Value>>,
}

/// Messages used by the Dokira web front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchMessages;

impl Translator for FrenchMessages {
    fn translate(
        &self,
        code: &str,
        field: &str,
        params: &BTreeMap<String, serde_json::Value>,
    ) -> Option<String> {
        let message = match (code, field) {
            ("required", _) => "Ce champ est obligatoire".to_string(),
            ("pattern", "email") | ("custom", "email") => {
                "Veuillez entrer une adresse email valide".to_string()
            }
            ("pattern", "telephone") | ("custom", "telephone") => {
                "Veuillez entrer un numéro de téléphone valide".to_string()
            }
            ("pattern", _) => "Format invalide".to_string(),
            ("custom", "password") => format!(
                "Le mot de passe doit contenir au moins {} caractères",
                crate::forms::PASSWORD_MIN_LENGTH
            ),
            ("length", "password") => {
                let min = params.get("min")?;
                format!("Le mot de passe doit contenir au moins {min} caractères")
            }
            ("length", "telephone") => {
                "Veuillez entrer un numéro de téléphone valide".to_string()
            }
            ("length", _) => {
                let min = params.get("min")?;
                format!("Ce champ doit contenir au moins {min} caractères")
            }
            ("match", _) => "Les mots de passe ne correspondent pas".to_string(),
            _ => return None,
        };
        Some(message)
    }
}

/// Errors raised while loading or compiling a rule set.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read rule set {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rule set: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field `{field}`: invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("field `{field}`: a rule may use a pattern or a custom check, not both")]
    ConflictingRefinement { field: String },

    #[error("field `{field}`: `pattern` and `format` are mutually exclusive")]
    ConflictingPattern { field: String },

    #[error("field `{field}`: `message` only applies to a custom check")]
    OrphanMessage { field: String },

    #[error("field `{field}`: unknown custom check `{check}`")]
    UnknownCheck { field: String, check: String },

    #[error("unknown form `{0}`")]
    UnknownForm(String),
}

/// Errors raised while building a snapshot from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("expected `field=value`, got `{0}`")]
    MalformedPair(String),
}

/// Why a guarded submission did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The snapshot failed validation; nothing was sent.
    #[error("{0}")]
    Invalid(ValidationResult),

    /// The backend refused or failed the submission.
    #[error("submission of `{form}` failed: {reason}")]
    Backend { form: String, reason: String },
}
