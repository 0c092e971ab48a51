use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::app::AppState;
use crate::content::store::ContentStore;
use crate::error::AppError;
use crate::forms::schemas::{FormSubmission, SubmissionReceipt};
use crate::relay::client::{FormRelay, RelaySettings, RelaySubmission};

/// Core submission logic, separated from the HTTP layer for testability.
///
/// Validates the form against the content store, relays it exactly once and
/// hands back a receipt. Nothing is stored locally.
pub async fn process_submission(
    store: &ContentStore,
    relay: &dyn FormRelay,
    settings: &RelaySettings,
    submission: FormSubmission,
) -> Result<SubmissionReceipt, AppError> {
    let kind = submission.kind();

    if let Err(errors) = submission.validate(store) {
        tracing::debug!(kind = kind.key(), %errors, "Rejected form submission");
        return Err(AppError::Validation(errors));
    }

    let payload = RelaySubmission::from_submission(&submission, settings);
    relay.deliver(&payload).await?;

    let receipt = SubmissionReceipt {
        id: uuid::Uuid::new_v4().to_string(),
        kind,
        received_at: Utc::now(),
    };
    tracing::info!(id = %receipt.id, kind = kind.key(), "Form submission relayed");
    Ok(receipt)
}

/// Axum handler for `POST /api/v1/forms`.
pub async fn submit_form_handler(
    State(state): State<AppState>,
    Json(submission): Json<FormSubmission>,
) -> Result<Json<SubmissionReceipt>, AppError> {
    let receipt = process_submission(
        state.content.as_ref(),
        state.relay.as_ref(),
        &state.relay_settings,
        submission,
    )
    .await?;

    Ok(Json(receipt))
}
