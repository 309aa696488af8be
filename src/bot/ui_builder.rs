//! UI Builder module for creating keyboards and formatting messages

use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::markdown;

use crate::catalog::SightEntry;
use crate::language::Language;
use crate::localization::t_lang;
use crate::pagination::PageView;

/// The language selection keyboard shown by /start and /lang.
pub fn language_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("English 🇬🇧", "en"),
        InlineKeyboardButton::callback("Русский 🇷🇺", "ru"),
    ]])
}

/// MarkdownV2 caption shown for a sight in the random and detail views.
pub fn sight_caption(sight: &SightEntry, lang: Language) -> String {
    format!(
        "✨ *{}*\n\n📖 {}\n\n🎩 {}",
        markdown::escape(sight.name.get(lang)),
        markdown::escape(sight.description.get(lang)),
        markdown::escape(sight.fun_fact.get(lang)),
    )
}

fn map_button(sight: &SightEntry, lang: Language) -> Option<InlineKeyboardButton> {
    // Location URLs are validated at capture time; entries edited by hand
    // may still carry something unparseable, in which case the button is
    // simply omitted.
    let url = Url::parse(&sight.location).ok()?;
    Some(InlineKeyboardButton::url(t_lang("show-location", lang), url))
}

/// Keyboard for the /rand view: just the map link.
pub fn location_keyboard(sight: &SightEntry, lang: Language) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<_>> = map_button(sight, lang).into_iter().map(|b| vec![b]).collect();
    InlineKeyboardMarkup::new(rows)
}

/// Keyboard for the detail view: map link plus back-to-list.
pub fn detail_keyboard(sight: &SightEntry, lang: Language) -> InlineKeyboardMarkup {
    let mut row = Vec::new();
    if let Some(button) = map_button(sight, lang) {
        row.push(button);
    }
    row.push(InlineKeyboardButton::callback(
        t_lang("back-list", lang),
        "back_to_list",
    ));
    InlineKeyboardMarkup::new(vec![row])
}

/// Keyboard for one list page: a button per sight (numbered across the
/// whole catalog, not per page) and a prev/next navigation row.
pub fn list_keyboard(view: &PageView<'_>, page: usize, page_size: usize, lang: Language) -> InlineKeyboardMarkup {
    let start_index = page * page_size;
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    for (offset, sight) in view.items.iter().enumerate() {
        rows.push(vec![InlineKeyboardButton::callback(
            format!("{}. {}", start_index + offset + 1, sight.name.get(lang)),
            format!("details_{}", sight.id),
        )]);
    }

    let mut nav = Vec::new();
    if view.has_prev {
        nav.push(InlineKeyboardButton::callback(
            t_lang("prev-button", lang),
            format!("page_{}", page - 1),
        ));
    }
    if view.has_next {
        nav.push(InlineKeyboardButton::callback(
            t_lang("next-button", lang),
            format!("page_{}", page + 1),
        ));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }

    InlineKeyboardMarkup::new(rows)
}

/// Yes/no keyboard for the delete confirmation step.
pub fn confirm_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Yes", "del_confirm"),
        InlineKeyboardButton::callback("❌ No", "del_cancel"),
    ]])
}
