//! `GmailSMTPServer` adapter — spec.md §4.3.
//!
//! STARTTLS + AUTH LOGIN via `lettre`. Sends `from`/`to`/`cc`/`bcc`, HTML if
//! the body contains tags else plain text, file attachments by path.

use async_trait::async_trait;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use super::provider::{DeliveryState, ProviderAdapter};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

pub struct GmailSmtpProvider {
    config: JsonValue,
}

impl GmailSmtpProvider {
    pub fn new(config: JsonValue) -> Self {
        Self { config }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(JsonValue::as_str)
    }

    fn recipient_list(&self, key: &str) -> Vec<String> {
        self.config
            .get(key)
            .and_then(JsonValue::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn attachment_paths(&self, content: &JsonValue) -> Vec<String> {
        content
            .get("attachments")
            .and_then(JsonValue::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProviderAdapter for GmailSmtpProvider {
    fn validate_config(&self) -> bool {
        let required = ["host", "port", "sender", "password"];
        let missing: Vec<&str> = required
            .iter()
            .filter(|key| self.config.get(**key).is_none())
            .copied()
            .collect();

        if !missing.is_empty() {
            tracing::warn!(
                provider = "GmailSMTPServer",
                missing = ?missing,
                "provider config missing required keys"
            );
            return false;
        }
        true
    }

    async fn send(&self, recipients: &[String], content: &JsonValue) -> DeliveryState {
        let Some(host) = self.str_field("host") else {
            return DeliveryState::Failed;
        };
        let port = self.config.get("port").and_then(JsonValue::as_u64).unwrap_or(587) as u16;
        let Some(sender) = self.str_field("sender") else {
            return DeliveryState::Failed;
        };
        let Some(password) = self.str_field("password") else {
            return DeliveryState::Failed;
        };

        let subject = content
            .get("subject")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let body = content
            .get("body")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();

        let Ok(from) = sender.parse::<Mailbox>() else {
            return DeliveryState::Failed;
        };

        let mut builder = Message::builder().from(from).subject(subject);

        for to in recipients {
            match to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.to(mailbox),
                Err(_) => return DeliveryState::Failed,
            }
        }
        for cc in self.recipient_list("cc") {
            if let Ok(mailbox) = cc.parse::<Mailbox>() {
                builder = builder.cc(mailbox);
            }
        }
        for bcc in self.recipient_list("bcc") {
            if let Ok(mailbox) = bcc.parse::<Mailbox>() {
                builder = builder.bcc(mailbox);
            }
        }

        let body_part = if HTML_TAG.is_match(body) {
            SinglePart::html(body.to_string())
        } else {
            SinglePart::plain(body.to_string())
        };

        let attachment_paths = self.attachment_paths(content);
        let message = if attachment_paths.is_empty() {
            builder.singlepart(body_part)
        } else {
            let mut multipart = MultiPart::mixed().singlepart(body_part);
            for path in &attachment_paths {
                match tokio::fs::read(path).await {
                    Ok(bytes) => {
                        let filename = std::path::Path::new(path)
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.clone());
                        let content_type = lettre::message::header::ContentType::parse(
                            "application/octet-stream",
                        )
                        .unwrap();
                        multipart =
                            multipart.singlepart(Attachment::new(filename).body(bytes, content_type));
                    }
                    Err(error) => {
                        tracing::warn!(path = %path, error = %error, "attachment file could not be read");
                        return DeliveryState::Failed;
                    }
                }
            }
            builder.multipart(multipart)
        };

        let Ok(email) = message else {
            return DeliveryState::Failed;
        };

        let creds = Credentials::new(sender.to_string(), password.to_string());
        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
            Ok(builder) => builder.port(port).credentials(creds).build(),
            Err(error) => {
                tracing::error!(error = %error, "failed to build SMTP transport");
                return DeliveryState::Failed;
            }
        };

        match transport.send(email).await {
            Ok(_) => DeliveryState::Sent,
            Err(error) => {
                tracing::error!(error = %error, "gmail smtp send failed");
                DeliveryState::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_config_requires_host_port_sender_password() {
        let provider = GmailSmtpProvider::new(json!({"host": "smtp.gmail.com"}));
        assert!(!provider.validate_config());

        let provider = GmailSmtpProvider::new(json!({
            "host": "smtp.gmail.com",
            "port": 587,
            "sender": "a@b.co",
            "password": "secret",
        }));
        assert!(provider.validate_config());
    }
}
