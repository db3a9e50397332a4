//! Credentials and endpoint settings read from the process environment.
//!
//! A `.env` file in the working directory is loaded first (if present), so
//! local runs and CI (where the variables are injected directly) behave the same.

use crate::error::AppError;

pub const DEFAULT_RAPIDAPI_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.deepinfra.com/v1/openai/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "openchat/openchat-3.6-8b";

/// RapidAPI host + key for the cricket data service.
#[derive(Debug, Clone)]
pub struct SportsCredentials {
    pub host: String,
    pub key: String,
}

/// Bearer key and endpoint for the hosted language model.
#[derive(Debug, Clone)]
pub struct ModelCredentials {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

impl SportsCredentials {
    pub fn from_env() -> Result<Self, AppError> {
        load_dotenv();
        let key = required("RAPIDAPI_KEY")?;
        let host = optional("RAPIDAPI_HOST").unwrap_or_else(|| DEFAULT_RAPIDAPI_HOST.to_string());
        Ok(Self { host, key })
    }
}

impl ModelCredentials {
    pub fn from_env() -> Result<Self, AppError> {
        load_dotenv();
        let api_key = required("DEEPINFRA_API_KEY")?;
        Ok(Self {
            api_key,
            endpoint: optional("DEEPINFRA_ENDPOINT").unwrap_or_else(|| DEFAULT_CHAT_ENDPOINT.to_string()),
            model: optional("DEEPINFRA_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        })
    }
}

fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        log::debug!(".env not found; using process environment only");
    }
}

fn required(name: &str) -> Result<String, AppError> {
    optional(name).ok_or_else(|| AppError::new(2, format!("Missing {name} in environment (.env).")))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
