// src/llm/openai.rs

//! Low-level OpenAI API client for chat completions and image generation.
//! Plain reqwest and serde_json against the REST endpoints.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::{ChatModel, ImageModel};
use crate::config::CompanionConfig;

#[derive(Clone)]
pub struct OpenAIClient {
    pub client: Client,
    pub api_key: Option<String>,
    pub api_base: String, // Default "https://api.openai.com/v1", but can be overridden
    pub chat_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub image_model: String,
    pub image_size: String,
}

impl OpenAIClient {
    pub fn from_config(client: Client, config: &CompanionConfig) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            api_base: config.openai_base_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            max_tokens: config.chat_max_tokens,
            temperature: config.chat_temperature,
            image_model: config.image_model.clone(),
            image_size: config.image_size.clone(),
        }
    }

    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.api_base, endpoint);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            return Err(anyhow!(
                "OpenAI {} failed ({}): {}",
                endpoint,
                status,
                resp.text().await.unwrap_or_default()
            ));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ChatModel for OpenAIClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let body = json!({
            "model": self.chat_model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_message},
            ],
        });

        let resp_json = self.post_json("chat/completions", &body).await?;
        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("No message content in OpenAI response"))?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl ImageModel for OpenAIClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "n": 1,
            "size": self.image_size,
        });

        let resp_json = self.post_json("images/generations", &body).await?;
        let url = resp_json["data"][0]["url"]
            .as_str()
            .ok_or_else(|| anyhow!("No image URL in OpenAI response"))?;

        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, routing::post};

    async fn mock_openai() -> String {
        let router = Router::new()
            .route(
                "/v1/chat/completions",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let echo = format!(
                        "{}|{}|{}|{}",
                        auth,
                        body["model"].as_str().unwrap_or_default(),
                        body["messages"][0]["role"].as_str().unwrap_or_default(),
                        body["messages"][1]["content"].as_str().unwrap_or_default(),
                    );
                    Json(json!({ "choices": [{ "message": { "content": echo } }] }))
                }),
            )
            .route(
                "/v1/images/generations",
                post(|Json(body): Json<Value>| async move {
                    let url = format!("https://cdn.example.com/{}.png", body["size"].as_str().unwrap_or_default());
                    Json(json!({ "data": [{ "url": url }] }))
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/", addr)
    }

    fn client_for(base: String) -> OpenAIClient {
        let config = CompanionConfig {
            openai_api_key: Some("sk-test".to_string()),
            openai_base_url: base,
            ..CompanionConfig::default()
        };
        OpenAIClient::from_config(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_pair() {
        let client = client_for(mock_openai().await);
        let content = client.complete("be nice", "hello there").await.unwrap();

        assert_eq!(content, "Bearer sk-test|gpt-3.5-turbo-1106|system|hello there");
    }

    #[tokio::test]
    async fn test_generate_image_returns_url() {
        let client = client_for(mock_openai().await);
        let url = client.generate_image("a red fox").await.unwrap();

        assert_eq!(url, "https://cdn.example.com/1024x1024.png");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new()).await.unwrap();
        });

        let client = client_for(format!("http://{}/v1", addr));
        let err = client.complete("sys", "user").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
