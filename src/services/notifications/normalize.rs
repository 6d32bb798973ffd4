//! Recipient normalization — spec.md §4.6 step 1, §8 idempotence property.

use crate::models::notification_type;

/// Parses recipients from either a list or a comma-separated string,
/// strips whitespace, strips a leading `+` for SMS, and deduplicates while
/// preserving first-seen order.
///
/// `normalize(normalize(xs)) == normalize(xs)` for any input.
pub fn normalize_recipients(notification_type: &str, raw: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for entry in raw {
        for candidate in entry.split(',') {
            let mut value = candidate.trim().to_string();
            if value.is_empty() {
                continue;
            }
            if notification_type == notification_type::SMS {
                value = value.strip_prefix('+').unwrap_or(&value).to_string();
            }
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_comma_separated_strings() {
        let raw = vec!["a@b.co, c@d.co".to_string()];
        assert_eq!(
            normalize_recipients("email", &raw),
            vec!["a@b.co".to_string(), "c@d.co".to_string()]
        );
    }

    #[test]
    fn strips_leading_plus_for_sms_and_dedupes() {
        let raw = vec!["+254712345678, 254712345678".to_string()];
        assert_eq!(
            normalize_recipients("sms", &raw),
            vec!["254712345678".to_string()]
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = vec!["+254712345678, 254712345678".to_string()];
        let once = normalize_recipients("sms", &raw);
        let twice = normalize_recipients("sms", &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn does_not_strip_plus_for_non_sms_types() {
        let raw = vec!["device-token-1".to_string()];
        assert_eq!(
            normalize_recipients("push", &raw),
            vec!["device-token-1".to_string()]
        );
    }
}
