//! Email type handler — spec.md §4.5.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value as JsonValue};

use crate::error::AppError;
use crate::models::Template;
use crate::services::template_renderer;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

pub fn validate(recipients: &[String], template: Option<&Template>) -> Result<(), AppError> {
    for recipient in recipients {
        if !EMAIL_RE.is_match(recipient) {
            return Err(AppError::Validation {
                field: "recipients".to_string(),
                reason: format!("'{}' is not a valid email address", recipient),
            });
        }
    }

    match template {
        Some(t) if !t.subject.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation {
            field: "template".to_string(),
            reason: "email template must have a non-empty subject".to_string(),
        }),
    }
}

pub fn prepare_content(template: Option<&Template>, context: &JsonValue) -> JsonValue {
    let (subject, body) = match template {
        Some(t) => (
            template_renderer::render(&t.subject, context),
            template_renderer::render(&t.body, context),
        ),
        None => (String::new(), String::new()),
    };

    json!({ "subject": subject, "body": body })
}
