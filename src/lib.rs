pub mod api;
pub mod article;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod profile;
pub mod summarizer;

#[cfg(test)]
mod testing;

use std::sync::Arc;
use config::Config;
use fetch::{HttpFetcher, PageFetcher};
use summarizer::{OpenRouterSummarizer, Summarizer};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    /// State wired to the real HTTP fetcher and OpenRouter summarizer.
    pub fn from_config(config: Config) -> error::Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout, config.max_page_bytes)?;
        let summarizer = OpenRouterSummarizer::new(&config);

        Ok(AppState {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            summarizer: Arc::new(summarizer),
        })
    }
}
