use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::message::NotificationPayload;

pub const KEY_SEPARATOR: char = '#';

/// How `message_key` is composed from the email and token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupeKeyStrategy {
    /// `email#token`. Compatible with keys already in the table, but two pairs
    /// collide when a field contains the separator.
    #[default]
    Joined,
    /// `<email length>:email#token`. Injective for any pair of strings.
    LengthPrefixed,
}

impl DedupeKeyStrategy {
    pub fn message_key(&self, email: &str, token: &str) -> String {
        match self {
            DedupeKeyStrategy::Joined => {
                if email.contains(KEY_SEPARATOR) || token.contains(KEY_SEPARATOR) {
                    warn!(email, "Dedupe key field contains the separator, key may be ambiguous");
                }
                format!("{}{}{}", email, KEY_SEPARATOR, token)
            }
            DedupeKeyStrategy::LengthPrefixed => {
                format!("{}:{}{}{}", email.len(), email, KEY_SEPARATOR, token)
            }
        }
    }
}

/// Row written to the dedupe table. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeRecord {
    pub message_key: String,
    pub created_at: String,
}

impl DedupeRecord {
    pub fn new(message_key: String, created_at: DateTime<Utc>) -> Self {
        Self {
            message_key,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn for_payload(payload: &NotificationPayload, strategy: DedupeKeyStrategy) -> Self {
        Self::new(
            strategy.message_key(&payload.email, &payload.token),
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_joined_key_matches_existing_format() {
        let key = DedupeKeyStrategy::Joined.message_key("user@example.com", "abc-123");
        assert_eq!(key, "user@example.com#abc-123");
    }

    #[test]
    fn test_joined_keys_can_collide() {
        let first = DedupeKeyStrategy::Joined.message_key("a#b", "c");
        let second = DedupeKeyStrategy::Joined.message_key("a", "b#c");
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_prefixed_keys_do_not_collide() {
        let first = DedupeKeyStrategy::LengthPrefixed.message_key("a#b", "c");
        let second = DedupeKeyStrategy::LengthPrefixed.message_key("a", "b#c");

        assert_eq!(first, "3:a#b#c");
        assert_eq!(second, "1:a#b#c");
        assert_ne!(first, second);
    }

    #[test]
    fn test_created_at_uses_millisecond_utc() {
        let at = Utc.with_ymd_and_hms(2025, 11, 13, 1, 23, 45).unwrap();
        let record = DedupeRecord::new("k".to_string(), at);
        assert_eq!(record.created_at, "2025-11-13T01:23:45.000Z");
    }

    #[test]
    fn test_strategy_parses_from_snake_case() {
        let strategy: DedupeKeyStrategy = serde_json::from_str(r#""length_prefixed""#).unwrap();
        assert_eq!(strategy, DedupeKeyStrategy::LengthPrefixed);
    }
}
