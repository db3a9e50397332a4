//! DeepInfra chat-completions client (OpenAI-compatible endpoint).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::ModelCredentials;
use crate::error::AppError;
use crate::rating::ChatModel;

const CHAT_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_TOKENS: u32 = 128;

pub struct DeepInfraClient {
    client: Client,
    credentials: ModelCredentials,
}

impl DeepInfraClient {
    pub fn new(credentials: ModelCredentials) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(CHAT_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, credentials })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(ModelCredentials::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.credentials.model
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatModel for DeepInfraClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        let request = ChatRequest {
            model: &self.credentials.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
        };

        log::debug!("POST {} (model {})", self.credentials.endpoint, self.credentials.model);
        let resp = self
            .client
            .post(&self.credentials.endpoint)
            .bearer_auth(&self.credentials.api_key)
            .json(&request)
            .send()
            .map_err(|e| AppError::new(4, format!("DeepInfra request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("DeepInfra request failed with status {}.", resp.status()),
            ));
        }

        let body: ChatResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse DeepInfra response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| AppError::new(4, "DeepInfra response contained no choices."))
    }
}
