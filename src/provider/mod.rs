//! External text-generation provider interface
//!
//! The service treats the provider as opaque and untrusted: text may be
//! missing, malformed, truncated, or wrapped in formatting. The trait seam
//! keeps orchestration testable without network access.

pub mod gemini;

use async_trait::async_trait;

use crate::{ItineraError, Result};

pub use gemini::GeminiClient;

/// Flattened provider response: the generated text when present, plus the
/// block/finish metadata needed to explain a withheld response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedText {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
    pub block_reason: Option<String>,
    pub block_message: Option<String>,
}

impl GeneratedText {
    /// Unwrap the generated text, turning a withheld or empty response into
    /// a generation error that names the provider's block reason when one
    /// was given.
    pub fn require_text(self) -> Result<String> {
        match self.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => match self.block_reason {
                Some(reason) => Err(ItineraError::generation(format!(
                    "provider blocked the request: {reason}{}",
                    self.block_message
                        .map(|m| format!(" - {m}"))
                        .unwrap_or_default()
                ))),
                None => Err(ItineraError::generation(
                    "provider returned an empty response without a block reason",
                )),
            },
        }
    }
}

/// Text-generation provider
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a prompt and return the provider's (possibly withheld) output
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<GeneratedText>;
}
