//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::middleware;
use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Global error handler (runs first) - catches and formats any unhandled errors
/// 2. Request ID middleware (runs second) - generates/propagates request IDs
/// 3. Logging middleware (runs third) - logs requests with request IDs
///
/// # Routes
/// - `POST /send-notification/` - notification admission
/// - `POST /belio-sms-callback/` - inbound delivery report reconciliation
/// - `GET /health`, `/health/ready`, `/health/live` - health probes
pub fn create_router(state: AppState) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .merge(handlers::notification::notification_routes())
        .merge(handlers::callback::callback_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        // Middleware is applied in reverse order - last added runs first
        // So: global_error_handler -> request_id -> logging
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn(global_error_handler))
        .with_state(state)
}
