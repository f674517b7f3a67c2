use serde::{Deserialize, Serialize};

/// Reportable terminal state of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum RecordOutcome {
    Sent { email: String },
    Error { error: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResults {
    pub results: Vec<RecordOutcome>,
}

/// What the function returns to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn ok(results: &BatchResults) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(results)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_outcomes_serialize_with_status_tag() {
        let results = BatchResults {
            results: vec![
                RecordOutcome::Sent {
                    email: "user@example.com".to_string(),
                },
                RecordOutcome::Error {
                    error: "boom".to_string(),
                },
            ],
        };

        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(
            value,
            json!({
                "results": [
                    { "email": "user@example.com", "status": "SENT" },
                    { "error": "boom", "status": "ERROR" }
                ]
            })
        );
    }

    #[test]
    fn test_handler_response_wraps_body_as_string() {
        let response = HandlerResponse::ok(&BatchResults::default()).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "statusCode": 200, "body": "{\"results\":[]}" }));
    }
}
