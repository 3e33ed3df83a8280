use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    pub original_words: usize,
    pub summary_words: usize,
    /// Characters of article text actually sent to the model.
    pub input_chars: usize,
    pub truncated: bool,
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub url: String,
    pub title: String,
    pub top_image: Option<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub summary: String,
    pub profile: String,
    pub model: String,
    pub metrics: Metrics,
    pub summarized_at: DateTime<Utc>,
}
