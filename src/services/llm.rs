// src/services/llm.rs
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::models::ChatMessage;

/// A language model that answers a conversation under a system prompt.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, messages: &[ChatMessage]) -> Result<String>;
}

/// Used when no API key is configured; every call fails.
pub struct DisabledChat;

#[async_trait]
impl ChatModel for DisabledChat {
    async fn complete(&self, _system_prompt: &str, _messages: &[ChatMessage]) -> Result<String> {
        bail!("chat model is disabled: OPENAI_API_KEY is not set")
    }
}

/// OpenAI-compatible `POST {base_url}/chat/completions` client.
pub struct OpenAiChat {
    client: Client,
    api_key: String,
    config: ChatConfig,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(api_key: String, config: ChatConfig) -> Self {
        OpenAiChat {
            client: Client::new(),
            api_key,
            config,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, system_prompt: &str, messages: &[ChatMessage]) -> Result<String> {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(system_prompt));
        all.extend_from_slice(messages);

        let body = CompletionRequest {
            model: &self.config.model,
            messages: all,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        info!("Requesting chat completion from {} ({})", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("chat completion failed ({}): {}", status, error_text));
        }

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        debug!("Chat completion returned {} characters", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use warp::http::StatusCode;
    use warp::Filter;

    type Captured = Arc<Mutex<Option<(String, Value)>>>;

    /// Serves one canned completion reply and records the last request.
    fn stub_server(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(None));
        let seen = captured.clone();
        let route = warp::path!("v1" / "chat" / "completions")
            .and(warp::post())
            .and(warp::header::<String>("authorization"))
            .and(warp::body::json())
            .map(move |auth: String, body: Value| {
                *seen.lock().unwrap() = Some((auth, body));
                warp::reply::with_status(warp::reply::json(&reply), status)
            });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        (format!("http://{}/v1/", addr), captured)
    }

    fn chat(base_url: String) -> OpenAiChat {
        OpenAiChat::new(
            "sk-test".to_string(),
            ChatConfig {
                base_url,
                model: "test-model".to_string(),
                temperature: 0.25,
                max_tokens: 123,
            },
        )
    }

    #[tokio::test]
    async fn posts_system_prompt_then_conversation() {
        let (url, captured) = stub_server(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "role": "assistant", "content": "Try a clean room." } }] }),
        );
        let messages = vec![ChatMessage::user("My drive is clicking")];

        let answer = chat(url).complete("You are an expert.", &messages).await.unwrap();
        assert_eq!(answer, "Try a clean room.");

        let (auth, body) = captured.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer sk-test");
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 123);
        assert_eq!(body["temperature"].as_f64(), Some(0.25));
        assert_eq!(
            body["messages"],
            json!([
                { "role": "system", "content": "You are an expert." },
                { "role": "user", "content": "My drive is clicking" }
            ])
        );
    }

    #[tokio::test]
    async fn null_or_missing_content_is_empty() {
        let (url, _) = stub_server(StatusCode::OK, json!({ "choices": [{ "message": { "content": null } }] }));
        let answer = chat(url).complete("prompt", &[ChatMessage::user("hi")]).await.unwrap();
        assert_eq!(answer, "");

        let (url, _) = stub_server(StatusCode::OK, json!({ "choices": [] }));
        let answer = chat(url).complete("prompt", &[ChatMessage::user("hi")]).await.unwrap();
        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (url, _) = stub_server(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "rate limited" } }),
        );
        let err = chat(url).complete("prompt", &[ChatMessage::user("hi")]).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("429"), "{}", text);
        assert!(text.contains("rate limited"), "{}", text);
    }

    #[tokio::test]
    async fn disabled_chat_always_fails() {
        assert!(DisabledChat.complete("prompt", &[]).await.is_err());
    }
}
