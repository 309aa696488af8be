//! Dialogue states for the add and delete conversations, plus the pure
//! decision helpers the wizard handlers are built from.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::catalog::{LocalizedText, SightEntry};

/// Resting state of a chat between two user actions. `Idle` doubles as the
/// terminal state: committed, cancelled and failed conversations all return
/// here after their closing message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum SightDialogueState {
    #[default]
    Idle,
    /// Add wizard, waiting for the sight name
    AddName { draft: SightDraft },
    /// Add wizard, waiting for the description
    AddDescription { draft: SightDraft },
    /// Add wizard, waiting for the fun fact
    AddFunFact { draft: SightDraft },
    /// Add wizard, waiting for a photo attachment
    AddPhoto { draft: SightDraft },
    /// Add wizard, waiting for the map link
    AddLocation { draft: SightDraft },
    /// Delete wizard, waiting for a search query
    DeleteSearch,
    /// Delete wizard, confirmation pending for exactly one candidate
    DeleteConfirm { candidates: Vec<SightEntry> },
}

impl SightDialogueState {
    /// Whether a wizard conversation is currently active.
    pub fn in_conversation(&self) -> bool {
        !matches!(self, SightDialogueState::Idle)
    }
}

/// Type alias for our sight dialogue
pub type SightDialogue = Dialogue<SightDialogueState, InMemStorage<SightDialogueState>>;

/// A sight under construction by the add wizard. Fields fill in step order;
/// the draft is discarded whole on cancellation or any step failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SightDraft {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub fun_fact: Option<LocalizedText>,
    pub photo: Option<String>,
}

impl SightDraft {
    /// Assemble the finished entry once every step has run. Returns `None`
    /// if any field is still missing, which the location handler treats as
    /// an internal error rather than committing a partial record.
    pub fn into_entry(self, id: u32, location: String) -> Option<SightEntry> {
        Some(SightEntry {
            id,
            name: self.name?,
            description: self.description?,
            fun_fact: self.fun_fact?,
            photo: self.photo?,
            location,
        })
    }
}

/// Validate the map link supplied at the final add step.
pub fn validate_location_url(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err("scheme");
    }

    // The scheme check is the contract; parsing catches garbage like bare
    // "https://" that would break the map button later.
    if reqwest::Url::parse(trimmed).is_err() {
        return Err("malformed");
    }

    Ok(trimmed.to_string())
}

/// Classification of a delete-wizard search result.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    /// Nothing matched; the conversation ends
    None,
    /// Exactly one match; safe to ask for confirmation
    Single(SightEntry),
    /// Several matches; list them and ask the user to narrow the query
    Multiple(Vec<SightEntry>),
}

pub fn classify_matches(mut matches: Vec<SightEntry>) -> MatchOutcome {
    match matches.len() {
        0 => MatchOutcome::None,
        1 => MatchOutcome::Single(matches.remove(0)),
        _ => MatchOutcome::Multiple(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(id: u32, en: &str, ru: &str) -> SightEntry {
        SightEntry {
            id,
            name: LocalizedText::new(en, ru),
            description: LocalizedText::new("d", "о"),
            fun_fact: LocalizedText::new("f", "ф"),
            photo: "photo.jpg".to_string(),
            location: "https://maps.example/x".to_string(),
        }
    }

    #[test]
    fn test_location_validation() {
        assert!(validate_location_url("https://maps.example/x").is_ok());
        assert!(validate_location_url("http://yandex.ru/maps/1").is_ok());
        assert_eq!(
            validate_location_url("  https://maps.example/x  ").unwrap(),
            "https://maps.example/x"
        );

        assert_eq!(validate_location_url("maps.example/x"), Err("scheme"));
        assert_eq!(validate_location_url("ftp://maps.example"), Err("scheme"));
        assert_eq!(validate_location_url(""), Err("scheme"));
        assert_eq!(validate_location_url("https://"), Err("malformed"));
    }

    #[test]
    fn test_classify_matches() {
        assert_eq!(classify_matches(vec![]), MatchOutcome::None);

        let one = sample_entry(1, "Lighthouse", "Маяк");
        assert_eq!(
            classify_matches(vec![one.clone()]),
            MatchOutcome::Single(one.clone())
        );

        let two = sample_entry(2, "Warehouse", "Склад");
        assert_eq!(
            classify_matches(vec![one.clone(), two.clone()]),
            MatchOutcome::Multiple(vec![one, two])
        );
    }

    #[test]
    fn test_draft_assembles_only_when_complete() {
        let complete = SightDraft {
            name: Some(LocalizedText::new("Lighthouse", "Маяк")),
            description: Some(LocalizedText::new("Tall", "Высокий")),
            fun_fact: Some(LocalizedText::new("Old", "Старый")),
            photo: Some("lighthouse.jpg".to_string()),
        };
        let entry = complete
            .into_entry(2, "https://maps.example/x".to_string())
            .unwrap();
        assert_eq!(entry.id, 2);
        assert_eq!(entry.name.ru, "Маяк");

        let partial = SightDraft {
            name: Some(LocalizedText::new("Lighthouse", "Маяк")),
            ..SightDraft::default()
        };
        assert!(partial
            .into_entry(3, "https://maps.example/x".to_string())
            .is_none());
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = SightDialogueState::default();
        assert!(matches!(state, SightDialogueState::Idle));
        assert!(!state.in_conversation());
        assert!(SightDialogueState::DeleteSearch.in_conversation());
    }
}
