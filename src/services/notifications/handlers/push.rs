//! Push type handler — spec.md §4.5.

use serde_json::{json, Value as JsonValue};

use crate::error::AppError;
use crate::models::Template;
use crate::services::template_renderer;

pub fn validate(recipients: &[String]) -> Result<(), AppError> {
    if recipients.is_empty() {
        return Err(AppError::Validation {
            field: "recipients".to_string(),
            reason: "at least one device token is required".to_string(),
        });
    }
    Ok(())
}

pub fn prepare_content(template: Option<&Template>, context: &JsonValue) -> JsonValue {
    let title = context
        .get("title")
        .and_then(JsonValue::as_str)
        .unwrap_or("Notification")
        .to_string();
    let body = template
        .map(|t| template_renderer::render(&t.body, context))
        .unwrap_or_default();
    let data = context.get("data").cloned().unwrap_or_else(|| json!({}));

    json!({ "title": title, "body": body, "data": data })
}
