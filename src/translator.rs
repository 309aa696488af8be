//! # Translation Module
//!
//! The bilingual text synchronizer. Every text field a user submits is
//! translated into the paired language before the draft advances; a failed
//! or empty translation aborts the whole wizard, so a half-translated entry
//! never reaches the catalog.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::BotError;
use crate::language::Language;

const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translation provider boundary. Results are not cached and repeated
/// calls may phrase the same input differently; callers may only rely on
/// a successful result being non-empty.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, BotError>;
}

/// Client for the public Google translate endpoint.
#[derive(Debug, Clone, Default)]
pub struct GoogleTranslator {
    client: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, BotError> {
        if text.trim().is_empty() {
            return Err(BotError::TranslationUnavailable(
                "empty input text".to_string(),
            ));
        }

        let response = self
            .client
            .get(TRANSLATE_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::TranslationUnavailable(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BotError::TranslationUnavailable(e.to_string()))?;

        // The endpoint answers with a nested array; the first element holds
        // one [translated, original, ...] segment per sentence.
        let segments = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| BotError::TranslationUnavailable("unexpected response shape".into()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }

        if translated.trim().is_empty() {
            return Err(BotError::TranslationUnavailable(
                "provider returned an empty result".to_string(),
            ));
        }

        debug!(
            source = %source,
            target = %target,
            chars = translated.len(),
            "translation completed"
        );
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_input_is_rejected_without_a_network_call() {
        let translator = GoogleTranslator::new();
        let result = translator.translate("   ", Language::En, Language::Ru).await;
        assert!(matches!(result, Err(BotError::TranslationUnavailable(_))));
    }
}
