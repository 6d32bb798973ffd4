//! Admission endpoint — spec.md §6. Validates JSON shape only and enqueues
//! the raw payload onto the dispatch queue; the Task Worker does the actual
//! resolution and sending (spec.md §4.7).

use axum::extract::State;
use axum::Json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{AdmissionResponse, SendNotificationRequest};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(send_notification))
}

/// Enqueues an admission request onto `notification_queue`.
///
/// # Responses
/// - `200 OK` with `code = "100.000.000"` once the payload is durably
///   enqueued.
/// - `200 OK` with `code = "999.999.999"` if the broker is unreachable —
///   the request shape was valid but acceptance could not complete.
#[utoipa::path(
    post,
    path = "/send-notification/",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Notification queued or rejected", body = AdmissionResponse)
    ),
    tag = NOTIFICATION_TAG
)]
pub async fn send_notification(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendNotificationRequest>,
) -> Json<AdmissionResponse> {
    let payload = match serde_json::to_vec(&request.into_admission_request()) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::error!(error = %error, "failed to serialize admission payload");
            return Json(AdmissionResponse::rejected("failed to serialize request"));
        }
    };

    match state
        .amqp_publisher
        .publish_dispatch(&state.dispatch_queue, &payload)
        .await
    {
        Ok(()) => Json(AdmissionResponse::accepted()),
        Err(error) => {
            tracing::error!(error = %error, "failed to enqueue notification");
            Json(AdmissionResponse::rejected("failed to enqueue notification"))
        }
    }
}
