//! Interfaces of the collaborators around the validator.
//!
//! The validator never touches the view or the network. A [`RenderSurface`]
//! supplies snapshots and displays results; a [`Submitter`] carries validated
//! payloads to the backend. [`validate_and_submit`] ties them together and
//! guarantees nothing is submitted unless validation passed.

use async_trait::async_trait;

use crate::error::{SubmitError, ValidationResult};
use crate::snapshot::FormSnapshot;
use crate::validator::FormValidator;

/// The view a form lives in.
pub trait RenderSurface {
    /// Capture the current field values.
    fn snapshot(&self) -> FormSnapshot;

    /// Remove error markers left by a previous attempt.
    fn clear_errors(&mut self);

    /// Mark invalid fields and display their messages.
    fn show(&mut self, result: &ValidationResult);
}

/// Channel to the backend for validated forms.
///
/// ## Example
///
/// ```rust,ignore
/// use dokira_forms::prelude::*;
///
/// struct PrescriptionApi { client: reqwest::Client }
///
/// #[async_trait]
/// impl Submitter for PrescriptionApi {
///     async fn submit(&self, form: &str, payload: &FormSnapshot) -> Result<(), String> {
///         self.client
///             .post("/medecin/api/ordonnances/creer")
///             .json(payload)
///             .send()
///             .await
///             .map_err(|e| e.to_string())?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Send `payload` for `form`. The error is the backend's reason.
    async fn submit(&self, form: &str, payload: &FormSnapshot) -> Result<(), String>;
}

/// Validate the surface's current values and submit them if they pass.
///
/// Clears previous markers, shows the fresh result, and returns
/// [`SubmitError::Invalid`] without calling the submitter when any field
/// fails.
pub async fn validate_and_submit<S>(
    validator: &FormValidator,
    surface: &mut S,
    submitter: &dyn Submitter,
) -> Result<FormSnapshot, SubmitError>
where
    S: RenderSurface + ?Sized,
{
    surface.clear_errors();
    let snapshot = surface.snapshot();
    let result = validator.validate(&snapshot);
    surface.show(&result);

    if !result.is_valid() {
        tracing::info!(
            form = %validator.name(),
            fields = ?result.field_names(),
            "submission blocked by validation"
        );
        return Err(SubmitError::Invalid(result));
    }

    submitter
        .submit(validator.name(), &snapshot)
        .await
        .map_err(|reason| {
            tracing::warn!(form = %validator.name(), %reason, "submission failed");
            SubmitError::Backend {
                form: validator.name().to_string(),
                reason,
            }
        })?;

    tracing::info!(form = %validator.name(), "form submitted");
    Ok(snapshot)
}
