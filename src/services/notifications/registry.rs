//! Provider Registry — spec.md §4.4.
//!
//! A process-wide immutable map from `Provider.class_name` to an adapter
//! constructor, replacing the original's dynamic class lookup by name (see
//! spec.md §9's REDESIGN FLAGS). Looking up an unknown name is a
//! configuration fault the Dispatch Engine treats as non-retryable.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value as JsonValue;

use super::africas_talking_sms_provider::AfricasTalkingSmsProvider;
use super::belio_sms_provider::BelioSmsProvider;
use super::firebase_push_provider::FirebasePushProvider;
use super::gmail_smtp_provider::GmailSmtpProvider;
use super::provider::ProviderAdapter;
use crate::error::AppError;

pub const GMAIL_SMTP_SERVER: &str = "GmailSMTPServer";
pub const FIREBASE_PUSH_PROVIDER: &str = "FirebasePushProvider";
pub const AFRICAS_TALKING_SMS_PROVIDER: &str = "AfricasTalkingSMSProvider";
pub const BELIO_SMS_PROVIDER: &str = "BelioSMSProvider";

type Constructor = fn(JsonValue) -> Box<dyn ProviderAdapter>;

static REGISTRY: LazyLock<HashMap<&'static str, Constructor>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, Constructor> = HashMap::new();
    map.insert(GMAIL_SMTP_SERVER, |config| {
        Box::new(GmailSmtpProvider::new(config))
    });
    map.insert(FIREBASE_PUSH_PROVIDER, |config| {
        Box::new(FirebasePushProvider::new(config))
    });
    map.insert(AFRICAS_TALKING_SMS_PROVIDER, |config| {
        Box::new(AfricasTalkingSmsProvider::new(config))
    });
    map.insert(BELIO_SMS_PROVIDER, |config| {
        Box::new(BelioSmsProvider::new(config))
    });
    map
});

/// Instantiates the adapter registered under `class_name` with `config`.
///
/// An unknown `class_name` is a configuration fault, not a transient one —
/// the Task Worker must not retry it.
pub fn instantiate(class_name: &str, config: JsonValue) -> Result<Box<dyn ProviderAdapter>, AppError> {
    match REGISTRY.get(class_name) {
        Some(constructor) => Ok(constructor(config)),
        None => Err(AppError::Configuration {
            key: "provider.class_name".to_string(),
            source: anyhow::anyhow!("unknown provider class '{}'", class_name),
        }),
    }
}
