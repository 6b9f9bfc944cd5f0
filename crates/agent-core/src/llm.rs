use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::agent::harness::LlmClient;

/// Config for an Ollama-style `POST /api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Full endpoint URL, e.g. `http://127.0.0.1:11434/api/generate`.
    pub endpoint: String,
    pub model: String,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Speech-model adapter over a generate endpoint. Holds one reqwest client
/// so connections are reused across turns.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    cfg: OllamaConfig,
}

impl OllamaClient {
    pub fn new(cfg: OllamaConfig) -> Self {
        Self {
            client: Client::new(),
            cfg,
        }
    }

    pub async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let request = OllamaRequest {
            model: self.cfg.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let res = self
            .client
            .post(&self.cfg.endpoint)
            .json(&request)
            .send()
            .await
            .context("llm request failed")?
            .error_for_status()
            .context("llm non-2xx response")?
            .json::<OllamaResponse>()
            .await
            .context("llm response decode failed")?;

        Ok(res.response)
    }
}

impl LlmClient for OllamaClient {
    fn complete<'a>(
        &'a self,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move { self.generate(&prompt).await })
    }
}
