//! # Bot Error Types Module
//!
//! This module defines the error taxonomy for the conversation engine.
//! Every variant maps to exactly one localized user-facing message.

/// Failures surfaced by the catalog conversation engine.
#[derive(Debug, Clone)]
pub enum BotError {
    /// A non-allow-listed user invoked a privileged command
    PermissionDenied,
    /// The translation provider failed or returned an empty result
    TranslationUnavailable(String),
    /// Malformed user input, recoverable within the same wizard state
    InvalidInput(String),
    /// Photo asset could not be stored
    AssetStore(String),
    /// Detail lookup for an id that no longer exists
    NotFound(u32),
    /// Listing or random pick against an empty catalog
    EmptyCatalog,
}

impl BotError {
    /// The Fluent message key shown to the user for this failure.
    pub fn message_key(&self) -> &'static str {
        match self {
            BotError::PermissionDenied => "permission-denied",
            BotError::TranslationUnavailable(_) => "translation-error",
            BotError::InvalidInput(_) => "invalid-link",
            BotError::AssetStore(_) => "photo-error",
            BotError::NotFound(_) => "error",
            BotError::EmptyCatalog => "no-sights",
        }
    }
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::PermissionDenied => write!(f, "Permission denied"),
            BotError::TranslationUnavailable(msg) => write!(f, "Translation unavailable: {msg}"),
            BotError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            BotError::AssetStore(msg) => write!(f, "Asset store error: {msg}"),
            BotError::NotFound(id) => write!(f, "No sight with id {id}"),
            BotError::EmptyCatalog => write!(f, "Catalog is empty"),
        }
    }
}

impl std::error::Error for BotError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let err = BotError::TranslationUnavailable("timeout".to_string());
        assert_eq!(format!("{err}"), "Translation unavailable: timeout");

        let err = BotError::NotFound(7);
        assert_eq!(format!("{err}"), "No sight with id 7");
    }

    #[test]
    fn test_every_variant_has_a_message_key() {
        let variants = [
            BotError::PermissionDenied,
            BotError::TranslationUnavailable(String::new()),
            BotError::InvalidInput(String::new()),
            BotError::AssetStore(String::new()),
            BotError::NotFound(0),
            BotError::EmptyCatalog,
        ];
        for v in variants {
            assert!(!v.message_key().is_empty());
        }
    }
}
