//! # Localization Tests
//!
//! Unit tests for message retrieval and formatting across the two
//! supported languages.

use sights::language::Language;
use sights::localization::{t_args_lang, t_lang, LocalizationManager};
use std::collections::HashMap;

fn setup_localization() -> LocalizationManager {
    LocalizationManager::new().expect("Failed to create localization manager")
}

#[test]
fn test_get_message_existing_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("help", Language::En, None);
    assert!(!message.is_empty());
    assert!(message.contains("/start"));
    assert!(message.contains("/del"));
}

#[test]
fn test_get_message_in_russian() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("no-sights", Language::Ru, None);
    assert!(message.contains("Пока нет"));
}

#[test]
fn test_basic_help_hides_admin_commands() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("help-basic", Language::En, None);
    assert!(message.contains("/rand"));
    assert!(!message.contains("/add"));
    assert!(!message.contains("/del"));
}

#[test]
fn test_get_message_nonexistent_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("nonexistent-key", Language::En, None);
    assert!(message.starts_with("Missing translation:"));
}

#[test]
fn test_get_message_with_args() {
    let manager = setup_localization();

    let mut args = HashMap::new();
    args.insert("name", "Lighthouse");

    let message = manager.get_message_in_language("del-success", Language::En, Some(&args));
    assert!(message.contains("Lighthouse"));
    assert!(!message.contains("$name"));
}

#[test]
fn test_page_argument_substitution_in_both_languages() {
    let en = t_args_lang("list-title", &[("page", "3")], Language::En);
    assert!(en.contains("Page 3"));

    let ru = t_args_lang("list-title", &[("page", "3")], Language::Ru);
    assert!(ru.contains("Страница 3"));
}

#[test]
fn test_global_helpers() {
    let message = t_lang("cancel", Language::Ru);
    assert!(message.contains("отменена"));
}

#[test]
fn test_locale_files_cover_the_same_keys() {
    // Both bundles must answer every key the handlers use; a key that
    // falls back to English for Russian users is a regression.
    let key_pattern = regex::Regex::new(r"(?m)^([a-z][a-z0-9-]*) =").unwrap();

    let keys_of = |path: &str| {
        let content = std::fs::read_to_string(path).unwrap();
        key_pattern
            .captures_iter(&content)
            .map(|c| c[1].to_string())
            .collect::<std::collections::BTreeSet<_>>()
    };

    let en = keys_of("./locales/en/main.ftl");
    let ru = keys_of("./locales/ru/main.ftl");
    assert!(!en.is_empty());
    assert_eq!(en, ru);
}
