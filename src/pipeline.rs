use std::time::Instant;

use chrono::Utc;
use reqwest::Url;
use tracing::{info, warn};

use crate::api::models::{Metrics, SummarizeRequest, SummaryReport};
use crate::article::{extract_article, truncate_chars, word_count};
use crate::error::{AppError, Result};
use crate::AppState;

pub const EXTRACTION_FAILED: &str = "Failed to extract text. Some websites block automated readers.";

/// Validate, fetch, extract, truncate, summarize.
pub async fn summarize_url(state: &AppState, req: &SummarizeRequest) -> Result<SummaryReport> {
    let start_time = Instant::now();

    let url = validate_url(&req.url)?;
    let profile = state.config.profile(req.profile.as_deref())?;

    info!(%url, profile = %profile.name, "fetching article");
    let html = tokio::time::timeout(state.config.fetch_timeout, state.fetcher.fetch(url.as_str()))
        .await
        .map_err(|_| AppError::Timeout(format!("Fetching {}", url)))??;

    let article = extract_article(url.as_str(), &html);
    let text_chars = article.text.chars().count();
    if article.text.is_empty() || text_chars < state.config.min_article_chars {
        warn!(%url, chars = text_chars, "extracted text too short");
        return Err(AppError::Extraction(EXTRACTION_FAILED.to_string()));
    }

    let input = truncate_chars(&article.text, profile.max_input_chars);
    let input_chars = input.chars().count();
    info!(
        %url,
        chars = text_chars,
        input_chars,
        "calling summarizer"
    );

    let summary = state.summarizer.summarize(input, profile).await?;
    let elapsed = start_time.elapsed();

    let metrics = Metrics {
        original_words: word_count(&article.text),
        summary_words: word_count(&summary),
        input_chars,
        truncated: input_chars < text_chars,
        elapsed_secs: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
    };
    info!(%url, ?elapsed, summary_words = metrics.summary_words, "article summarized");

    Ok(SummaryReport {
        url: url.to_string(),
        title: article.title,
        top_image: article.top_image,
        authors: article.authors,
        publish_date: article.publish_date,
        summary,
        profile: profile.name.clone(),
        model: profile.model.clone(),
        metrics,
        summarized_at: Utc::now(),
    })
}

/// Only absolute http(s) URLs are fetched.
pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::EmptyUrl);
    }

    let url = Url::parse(raw).map_err(|e| AppError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(AppError::InvalidUrl(format!("unsupported scheme '{}' in {}", scheme, raw))),
    }
}
