//! SMS type handler — spec.md §4.5.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value as JsonValue};

use crate::error::AppError;
use crate::models::Template;
use crate::services::template_renderer;

const MAX_SMS_LENGTH: usize = 160;

static E164_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{1,14}$").unwrap());

pub fn validate(
    recipients: &[String],
    template: Option<&Template>,
    context: &JsonValue,
) -> Result<(), AppError> {
    for recipient in recipients {
        if !E164_RE.is_match(recipient) {
            return Err(AppError::Validation {
                field: "recipients".to_string(),
                reason: format!("'{}' is not a valid E.164 phone number", recipient),
            });
        }
    }

    let Some(t) = template else {
        return Err(AppError::Validation {
            field: "template".to_string(),
            reason: "sms template must have a non-empty body".to_string(),
        });
    };

    if t.body.trim().is_empty() {
        return Err(AppError::Validation {
            field: "template".to_string(),
            reason: "sms template must have a non-empty body".to_string(),
        });
    }

    let rendered = template_renderer::render(&t.body, context);
    if rendered.chars().count() > MAX_SMS_LENGTH {
        return Err(AppError::Validation {
            field: "body".to_string(),
            reason: "SMS content exceeds 160 characters".to_string(),
        });
    }

    Ok(())
}

pub fn prepare_content(system_name: &str, template: Option<&Template>, context: &JsonValue) -> JsonValue {
    let body = template
        .map(|t| template_renderer::render(&t.body, context))
        .unwrap_or_default();

    json!({ "sender_id": system_name, "body": body })
}
