//! Client for the admin assistant chat endpoint
//!
//! The endpoint is opaque: the conversation goes out as `{ messages }` and a
//! `{ response }` text comes back.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Shown when the endpoint answers without any text
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

/// One turn of the admin conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Default, Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: Option<String>,
}

impl ChatReply {
    fn into_text(self) -> String {
        self.response
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// Assistant API client
#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    endpoint: String,
}

impl AssistantClient {
    pub fn new(endpoint: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build assistant client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Forward the conversation and return the assistant's reply text
    pub async fn chat(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Assistant request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Assistant error: {} - {}",
                status, body
            )));
        }

        // A body without a usable `response` still yields the fallback
        let reply: ChatReply = response.json().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "assistant reply could not be parsed");
            ChatReply::default()
        });

        Ok(reply.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_falls_back_when_missing_or_blank() {
        let missing: ChatReply = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.into_text(), FALLBACK_REPLY);

        let blank: ChatReply = serde_json::from_str(r#"{"response": "  "}"#).unwrap();
        assert_eq!(blank.into_text(), FALLBACK_REPLY);

        let answered: ChatReply =
            serde_json::from_str(r#"{"response": "12 businesses await verification"}"#).unwrap();
        assert_eq!(answered.into_text(), "12 businesses await verification");
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: "How many pending listings?".to_string(),
        }];
        let body = serde_json::to_value(ChatRequest {
            messages: &messages,
        })
        .unwrap();

        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "How many pending listings?");
    }
}
