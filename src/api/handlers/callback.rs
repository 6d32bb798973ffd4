//! Inbound delivery report endpoint — spec.md §4.9.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{BelioCallbackRequest, MessageResponse};
use crate::state::AppState;

pub fn callback_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(belio_sms_callback))
}

/// Reconciles a Belio-shaped delivery report against the ledger — spec.md
/// §4.9. Accepts any `correlator` without authentication, matching the
/// reference implementation's behavior.
#[utoipa::path(
    post,
    path = "/belio-sms-callback/",
    request_body = BelioCallbackRequest,
    responses(
        (status = 200, description = "Reconciled", body = MessageResponse),
        (status = 500, description = "Reconciliation failed", body = MessageResponse)
    ),
    tag = NOTIFICATION_TAG
)]
pub async fn belio_sms_callback(
    State(state): State<AppState>,
    Json(request): Json<BelioCallbackRequest>,
) -> (StatusCode, Json<MessageResponse>) {
    match state.services.inbound.reconcile(request.into()).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Success"))),
        Err(error) => {
            tracing::error!(error = %error, "belio callback reconciliation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Internal server error")),
            )
        }
    }
}
