use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::profile::SummaryProfile;

/// Turns article text into a short abstractive summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, profile: &SummaryProfile) -> Result<String>;
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: usize,
}

/// Summarizer backed by an OpenRouter-compatible chat completions endpoint.
pub struct OpenRouterSummarizer {
    client: Client,
    api_key: String,
    endpoint: String,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterSummarizer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openrouter_api_key.clone(),
            endpoint: format!("{}/chat/completions", config.openrouter_base_url),
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        }
    }
}

#[async_trait]
impl Summarizer for OpenRouterSummarizer {
    async fn summarize(&self, text: &str, profile: &SummaryProfile) -> Result<String> {
        let body = ChatRequest {
            model: profile.model.clone(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: "You are a news editor who writes faithful, neutral abstractive summaries.".into(),
                },
                Message {
                    role: "user".into(),
                    content: build_prompt(text, profile),
                },
            ],
            temperature: 0.0,
            max_tokens: max_tokens(profile),
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);

        // Add optional headers if provided
        if let Some(url) = &self.site_url {
            request = request.header("HTTP-Referer", url);
        }

        if let Some(name) = &self.site_name {
            request = request.header("X-Title", name);
        }

        let res = request.send().await?;
        let status = res.status();
        let raw = res.text().await?;
        let json = serde_json::from_str::<serde_json::Value>(&raw);

        if !status.is_success() {
            let detail = json
                .ok()
                .and_then(|j| j["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| "no error message".to_string());
            return Err(AppError::LlmError(format!("model API returned {}: {}", status, detail)));
        }

        let json = json.map_err(|e| AppError::LlmError(format!("Invalid JSON from LLM: {}", e)))?;
        let summary = parse_completion(&json)?;
        debug!(model = %profile.model, words = summary.split_whitespace().count(), "summary received");
        Ok(summary)
    }
}

pub fn build_prompt(text: &str, profile: &SummaryProfile) -> String {
    let mut result = String::with_capacity(text.len() + 256);
    result.push_str(&format!(
        "Summarize the following news article in plain prose between {} and {} words. \
         Paraphrase instead of copying sentences, keep names and numbers accurate, \
         and reply with the summary only.\n\n",
        profile.min_length, profile.max_length
    ));
    result.push_str(text);
    result
}

/// Token budget for a summary of `max_length` words, with headroom.
fn max_tokens(profile: &SummaryProfile) -> usize {
    profile.max_length * 2
}

fn parse_completion(json: &serde_json::Value) -> Result<String> {
    let reply = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))?
        .trim();

    if reply.is_empty() {
        return Err(AppError::LlmError("LLM returned an empty summary".to_string()));
    }

    Ok(reply.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin_profiles;
    use crate::testing::serve;
    use axum::{http::{HeaderMap, StatusCode}, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn summarizer_for(app: Router) -> OpenRouterSummarizer {
        let base = serve(app).await;
        let config = Config::from_lookup(|key| match key {
            "OPENROUTER_API_KEY" => Some("sk-test".to_string()),
            "OPENROUTER_BASE_URL" => Some(format!("{}/v1", base)),
            _ => None,
        })
        .unwrap();
        OpenRouterSummarizer::new(&config)
    }

    #[test]
    fn prompt_carries_length_bounds_and_text() {
        let profile = &builtin_profiles()[0];
        let prompt = build_prompt("Body text.", profile);

        assert!(prompt.contains("between 40 and 150 words"));
        assert!(prompt.ends_with("Body text."));
        assert_eq!(max_tokens(profile), 300);
    }

    #[test]
    fn parses_first_choice() {
        let json = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Rivers rose.\n" } }]
        });
        assert_eq!(parse_completion(&json).unwrap(), "Rivers rose.");
    }

    #[test]
    fn rejects_malformed_or_empty_replies() {
        assert!(matches!(parse_completion(&json!({ "choices": [] })), Err(AppError::LlmError(_))));
        let blank = json!({ "choices": [{ "message": { "content": "   " } }] });
        assert!(matches!(parse_completion(&blank), Err(AppError::LlmError(_))));
    }

    #[test]
    fn request_body_is_deterministic() {
        let body = ChatRequest {
            model: "m".into(),
            messages: vec![],
            temperature: 0.0,
            max_tokens: 10,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["temperature"], json!(0.0));
        assert_eq!(value["max_tokens"], json!(10));
    }

    #[tokio::test]
    async fn sends_model_and_key_and_returns_reply() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers["authorization"].to_str().unwrap().to_string();
                let content = format!("{} | {} | {}", body["model"].as_str().unwrap(), auth, body["max_tokens"]);
                Json(json!({ "choices": [{ "message": { "content": content } }] }))
            }),
        );
        let summarizer = summarizer_for(app).await;
        let profile = &builtin_profiles()[0];

        let reply = summarizer.summarize("Article text.", profile).await.unwrap();
        assert_eq!(reply, "deepseek/deepseek-chat-v3-0324 | Bearer sk-test | 300");
    }

    #[tokio::test]
    async fn error_status_carries_api_message() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": { "message": "quota" } })),
                )
            }),
        );
        let summarizer = summarizer_for(app).await;

        let err = summarizer.summarize("text", &builtin_profiles()[0]).await.unwrap_err();
        match err {
            AppError::LlmError(msg) => {
                assert!(msg.contains("500"), "{}", msg);
                assert!(msg.contains("quota"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_reply_is_an_llm_error() {
        let app = Router::new().route("/v1/chat/completions", post(|| async { "<html>gateway</html>" }));
        let summarizer = summarizer_for(app).await;

        let err = summarizer.summarize("text", &builtin_profiles()[0]).await.unwrap_err();
        assert!(matches!(err, AppError::LlmError(ref msg) if msg.contains("Invalid JSON")), "{:?}", err);
    }
}
