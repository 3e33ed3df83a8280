use serde::Serialize;

use crate::error::{AppError, Result};

/// A named bundle of model, input budget and summary length bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryProfile {
    pub name: String,
    pub model: String,
    /// Maximum number of characters of article text sent to the model.
    pub max_input_chars: usize,
    /// Lower bound on summary length, in words.
    pub min_length: usize,
    /// Upper bound on summary length, in words.
    pub max_length: usize,
}

pub const DEFAULT_PROFILE: &str = "standard";

pub fn builtin_profiles() -> Vec<SummaryProfile> {
    vec![
        SummaryProfile {
            name: "standard".into(),
            model: "deepseek/deepseek-chat-v3-0324".into(),
            max_input_chars: 3000,
            min_length: 40,
            max_length: 150,
        },
        SummaryProfile {
            name: "brief".into(),
            model: "meta-llama/llama-3.1-8b-instruct".into(),
            max_input_chars: 2000,
            min_length: 30,
            max_length: 100,
        },
        SummaryProfile {
            name: "detailed".into(),
            model: "deepseek/deepseek-chat-v3-0324".into(),
            max_input_chars: 4000,
            min_length: 60,
            max_length: 250,
        },
    ]
}

/// Case-insensitive lookup.
pub fn find<'a>(profiles: &'a [SummaryProfile], name: &str) -> Result<&'a SummaryProfile> {
    let wanted = name.trim();
    profiles
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| AppError::UnknownProfile {
            name: wanted.to_string(),
            expected: profiles
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}
