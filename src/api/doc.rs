use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notification";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "notify-bus",
        description = "Multi-tenant notification dispatch bus",
    ),
    tags(
        (name = HEALTH_TAG, description = "Liveness and readiness endpoints"),
        (name = NOTIFICATION_TAG, description = "Notification admission and delivery callbacks"),
    ),
)]
pub struct ApiDoc;
