use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Produces the text the mouth should say in reply to a prompt.
pub trait TextGenerator {
    fn generate(&mut self, prompt: &str) -> Result<String, UpstreamError>;
}

impl<F> TextGenerator for F
where
    F: FnMut(&str) -> Result<String, UpstreamError>,
{
    fn generate(&mut self, prompt: &str) -> Result<String, UpstreamError> {
        self(prompt)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Extract the first reply from a chat completion response body.
pub fn parse_reply(body: &str) -> Result<String, UpstreamError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(UpstreamError::EmptyReply)
}

/// Client for an OpenAI-compatible chat completion API (Groq by default).
///
/// Every prompt is sent on its own; no conversation history is kept.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl TextGenerator for ChatClient {
    fn generate(&mut self, prompt: &str) -> Result<String, UpstreamError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_reply(&body)
    }
}
