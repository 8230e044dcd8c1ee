//! Seam between the pipelines and the generative-model provider.
//!
//! Every pipeline talks to the model through the `ChatModel` trait so tests
//! can substitute canned replies. The production implementation in
//! `openai.rs` speaks the OpenAI-compatible chat-completions protocol over
//! reqwest. Replies are expected to be JSON-shaped text; `parse_reply`
//! tolerates a surrounding markdown code fence but nothing else, and a
//! non-conforming reply fails the calling operation outright.

mod openai;

pub use openai::OpenAiModel;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Per-call sampling parameters.
#[derive(Debug, Clone, Copy)]
pub struct ChatParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ChatParams {
    fn default() -> Self {
        ChatParams {
            max_tokens: 4000,
            temperature: 0.7,
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one system+user exchange and return the raw reply text.
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        params: ChatParams,
    ) -> Result<String, String>;
}

/// Parse a model reply as JSON into `T`, stripping an optional markdown
/// code fence first.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, String> {
    let trimmed = strip_code_fence(reply);
    serde_json::from_str(trimmed).map_err(|e| format!("Réponse du modèle non conforme: {}", e))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag of the opening fence, then the closing fence.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed queue of replies, one per `complete` call.
    pub struct StubModel {
        replies: Mutex<VecDeque<String>>,
    }

    impl StubModel {
        pub fn new<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            StubModel {
                replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            }
        }
    }

    #[async_trait]
    impl ChatModel for StubModel {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _params: ChatParams,
        ) -> Result<String, String> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| "stub exhausted".to_string())
        }
    }

    /// Fails every call, for exercising error propagation.
    pub struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _params: ChatParams,
        ) -> Result<String, String> {
            Err("model unavailable".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Reply {
        tagline: String,
    }

    #[test]
    fn parses_bare_json() {
        let r: Reply = parse_reply("{\"tagline\": \"Le goût du matin\"}").unwrap();
        assert_eq!(r.tagline, "Le goût du matin");
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = "```json\n{\"tagline\": \"ok\"}\n```";
        let r: Reply = parse_reply(fenced).unwrap();
        assert_eq!(r.tagline, "ok");
    }

    #[test]
    fn malformed_reply_fails() {
        assert!(parse_reply::<Reply>("Voici votre slogan: super!").is_err());
    }
}
