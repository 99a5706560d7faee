//! HTTP client for the qBraid chat API.
//!
//! Two calls: list the chat models, send a single-turn chat prompt. The
//! credential travels in the `api-key` header and nowhere else.

use crate::error::qbraid_client::ChatClientError;

use common::{ChatTurn, ErrorLocation, RedactedApiKey};

use std::panic::Location;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "api-key";
const MODELS_ENDPOINT: &str = "chat/models";
const CHAT_ENDPOINT: &str = "chat";

/// A single-turn chat response from the server.
///
/// The server promises an object with at least a `content` field; anything
/// else in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub content: Option<String>,
}

/// Shown in the transcript when the response object carries no `content`.
pub const MISSING_CONTENT_PLACEHOLDER: &str = "No response content available.";

impl ChatResponse {
    /// The response content, or the fixed placeholder when absent.
    pub fn content_or_placeholder(&self) -> &str {
        self.content.as_deref().unwrap_or(MISSING_CONTENT_PLACEHOLDER)
    }

    /// Pair this response with the prompt that produced it.
    pub fn into_turn(self, prompt: String) -> ChatTurn {
        let content = self.content_or_placeholder().to_owned();
        ChatTurn::new(prompt, content)
    }
}

#[derive(Clone)]
pub struct QbraidClient {
    base_url: Url,
    client: Client,
}

impl QbraidClient {
    pub fn new(base_url_str: &str) -> Result<Self, ChatClientError> {
        let base_url = Url::parse(base_url_str)?;
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Fetch the list of chat model identifiers.
    ///
    /// # Errors
    /// Returns [`ChatClientError::Server`] carrying the status and raw body
    /// on a non-success response, [`ChatClientError::Http`] on transport
    /// failure, [`ChatClientError::Json`] when the body is not a string
    /// array.
    pub async fn list_models(
        &self,
        api_key: &RedactedApiKey,
    ) -> Result<Vec<String>, ChatClientError> {
        let url = self.base_url.join(MODELS_ENDPOINT)?;

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatClientError::Server {
                status_code: status.as_u16().into(),
                body: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let json: Value = response.json().await?;
        let models: Vec<String> = serde_json::from_value(json)?;

        Ok(models)
    }

    /// Send a single-turn chat prompt and return the response object.
    ///
    /// The body is exactly `{"prompt": <prompt>}`. The stored model
    /// selection is deliberately not transmitted.
    ///
    /// # Errors
    /// Same taxonomy as [`Self::list_models`].
    pub async fn send_chat(
        &self,
        api_key: &RedactedApiKey,
        prompt: &str,
    ) -> Result<ChatResponse, ChatClientError> {
        let url = self.base_url.join(CHAT_ENDPOINT)?;

        let body = serde_json::json!({ "prompt": prompt });

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatClientError::Server {
                status_code: status.as_u16().into(),
                body: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let json: Value = response.json().await?;
        let chat_response: ChatResponse = serde_json::from_value(json)?;

        Ok(chat_response)
    }
}
