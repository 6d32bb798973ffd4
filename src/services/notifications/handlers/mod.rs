//! Notification Type Handlers — spec.md §4.5.
//!
//! Replaces the original's polymorphic email/sms/push class hierarchy with
//! a capability set dispatched on a tagged variant, per the REDESIGN FLAGS
//! in spec.md §9.

mod email;
mod push;
mod sms;

use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::models::{notification_type, Template};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHandler {
    Email,
    Sms,
    Push,
}

impl TypeHandler {
    pub fn for_type_name(name: &str) -> Option<Self> {
        match name {
            notification_type::EMAIL => Some(Self::Email),
            notification_type::SMS => Some(Self::Sms),
            notification_type::PUSH => Some(Self::Push),
            _ => None,
        }
    }

    /// Per-type sanity check; raises on violation.
    pub fn validate(
        &self,
        recipients: &[String],
        template: Option<&Template>,
        context: &JsonValue,
    ) -> Result<(), AppError> {
        match self {
            Self::Email => email::validate(recipients, template),
            Self::Sms => sms::validate(recipients, template, context),
            Self::Push => push::validate(recipients),
        }
    }

    /// Renders the template fields and returns the type-specific payload.
    pub fn prepare_content(
        &self,
        system_name: &str,
        template: Option<&Template>,
        context: &JsonValue,
    ) -> JsonValue {
        match self {
            Self::Email => email::prepare_content(template, context),
            Self::Sms => sms::prepare_content(system_name, template, context),
            Self::Push => push::prepare_content(template, context),
        }
    }
}
