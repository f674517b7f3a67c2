use serde::{Deserialize, Serialize};

/// Batch delivered by an SNS subscription. Envelope and message are optional
/// because records without them are skipped rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns", default, skip_serializing_if = "Option::is_none")]
    pub sns: Option<SnsEnvelope>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(rename = "TopicArn", default, skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,

    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SnsRecord {
    /// Record carrying `message` as its SNS body.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            sns: Some(SnsEnvelope {
                message_id: None,
                topic_arn: None,
                message: Some(message.into()),
            }),
        }
    }

    pub fn message_id(&self) -> &str {
        self.sns
            .as_ref()
            .and_then(|sns| sns.message_id.as_deref())
            .unwrap_or_default()
    }

    pub fn topic_arn(&self) -> &str {
        self.sns
            .as_ref()
            .and_then(|sns| sns.topic_arn.as_deref())
            .unwrap_or_default()
    }

    /// The SNS message body, if the record has a non-empty one.
    pub fn body(&self) -> Option<&str> {
        self.sns
            .as_ref()
            .and_then(|sns| sns.message.as_deref())
            .filter(|message| !message.is_empty())
    }
}

/// Message body as published to the topic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationMessage {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A message with both required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub email: String,
    pub token: String,
    pub timestamp: Option<String>,
}

impl NotificationMessage {
    /// Returns `None` when `email` or `token` is missing or empty.
    pub fn into_payload(self) -> Option<NotificationPayload> {
        let email = self.email.filter(|email| !email.is_empty())?;
        let token = self.token.filter(|token| !token.is_empty())?;

        Some(NotificationPayload {
            email,
            token,
            timestamp: self.timestamp,
        })
    }
}
