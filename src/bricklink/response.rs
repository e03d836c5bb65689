//! Price guide response envelope handling

use crate::models::{LookupOutcome, PriceGuide};
use serde::Deserialize;

/// Every API response is wrapped as `{"meta": {...}, "data": ...}`
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    meta: Option<ApiMeta>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiMeta {
    code: Option<i64>,
    message: Option<String>,
    description: Option<String>,
}

impl ApiMeta {
    fn error_text(&self) -> String {
        let message = self
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("Unknown error");
        match self.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => format!("{message} - {description}"),
            None => message.to_string(),
        }
    }
}

/// Turn an HTTP status and response body into a lookup outcome.
///
/// Success is decided by `meta.code` in the body, not by the HTTP status.
pub fn interpret_response(status: u16, body: &str) -> LookupOutcome {
    let envelope: ApiEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::debug!("Response body is not a JSON envelope: {}", e);
            return LookupOutcome::Failure {
                error: format!("HTTP {status}: {body}"),
                status: Some(status),
            };
        }
    };

    let meta = envelope.meta.unwrap_or_default();
    if meta.code != Some(200) {
        return LookupOutcome::Failure {
            error: meta.error_text(),
            status: Some(status),
        };
    }

    let guide = match envelope.data {
        None | Some(serde_json::Value::Null) => PriceGuide::default(),
        Some(data) => match serde_json::from_value::<PriceGuide>(data) {
            Ok(guide) => guide,
            Err(e) => {
                return LookupOutcome::Failure {
                    error: format!("Invalid price guide payload: {e}"),
                    status: Some(status),
                }
            }
        },
    };

    LookupOutcome::Success { guide }
}
