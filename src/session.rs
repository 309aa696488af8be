//! # Session Module
//!
//! Per-chat state that outlives a single wizard: the chosen display
//! language and the last list page. Wizard drafts live in the dialogue
//! storage instead and are dropped when a conversation ends.

use std::collections::HashMap;
use std::sync::Mutex;
use teloxide::types::ChatId;

use crate::language::Language;

#[derive(Debug, Clone, Copy, Default)]
struct Session {
    language: Language,
    current_page: usize,
}

/// Shared map of per-chat sessions. Locked only for short reads/writes,
/// never across an await point.
#[derive(Debug, Default)]
pub struct Sessions {
    inner: Mutex<HashMap<ChatId, Session>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&self, chat: ChatId) -> Language {
        self.inner
            .lock()
            .unwrap()
            .get(&chat)
            .map(|s| s.language)
            .unwrap_or_default()
    }

    pub fn set_language(&self, chat: ChatId, language: Language) {
        self.inner.lock().unwrap().entry(chat).or_default().language = language;
    }

    pub fn current_page(&self, chat: ChatId) -> usize {
        self.inner
            .lock()
            .unwrap()
            .get(&chat)
            .map(|s| s.current_page)
            .unwrap_or(0)
    }

    pub fn set_current_page(&self, chat: ChatId, page: usize) {
        self.inner
            .lock()
            .unwrap()
            .entry(chat)
            .or_default()
            .current_page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sessions = Sessions::new();
        let chat = ChatId(1);
        assert_eq!(sessions.language(chat), Language::En);
        assert_eq!(sessions.current_page(chat), 0);
    }

    #[test]
    fn test_language_and_page_are_independent_per_chat() {
        let sessions = Sessions::new();
        sessions.set_language(ChatId(1), Language::Ru);
        sessions.set_current_page(ChatId(1), 3);
        sessions.set_current_page(ChatId(2), 7);

        assert_eq!(sessions.language(ChatId(1)), Language::Ru);
        assert_eq!(sessions.current_page(ChatId(1)), 3);
        assert_eq!(sessions.language(ChatId(2)), Language::En);
        assert_eq!(sessions.current_page(ChatId(2)), 7);
    }
}
