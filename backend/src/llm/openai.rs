use crate::config::Config;
use crate::llm::{ChatModel, ChatParams};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions backend for any OpenAI-compatible endpoint.
pub struct OpenAiModel {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiModel {
    pub fn new(config: &Config) -> Result<OpenAiModel, String> {
        if config.model_api_key.is_empty() {
            return Err("La clé API du modèle n'est pas définie (OPENAI_API_KEY)".to_string());
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| e.to_string())?;
        Ok(OpenAiModel {
            client,
            base_url: config.model_base_url.clone(),
            api_key: config.model_api_key.clone(),
            model: config.model_name.clone(),
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        params: ChatParams,
    ) -> Result<String, String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        debug!("model call: {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Erreur de transport vers le modèle: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("Le modèle a répondu {}: {}", status, text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("Réponse du modèle illisible: {}", e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| "Réponse du modèle sans contenu".to_string())
    }
}
