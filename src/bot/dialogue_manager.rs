//! Dialogue Manager module for the add and delete wizard steps

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{FileId, MessageId};
use tracing::{error, info, warn};

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import dialogue types
use crate::dialogue::{
    classify_matches, validate_location_url, MatchOutcome, SightDialogue, SightDialogueState,
    SightDraft,
};

// Import catalog and asset types
use crate::assets::photo_filename;
use crate::catalog::LocalizedText;
use crate::errors::BotError;
use crate::language::Language;

// Import UI builder functions
use super::ui_builder;
use super::BotDeps;

/// Translate one wizard field into the paired language, producing the
/// bilingual value stored on the draft.
async fn synchronize_field(
    deps: &BotDeps,
    input: &str,
    lang: Language,
) -> Result<LocalizedText, BotError> {
    let translated = deps
        .translator
        .translate(input, lang, lang.paired())
        .await?;
    Ok(LocalizedText::from_pair(lang, input.to_string(), translated))
}

/// Abort the whole add wizard after a failed translation. The draft is
/// dropped with the dialogue state; nothing reaches the catalog.
async fn abort_translation(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &SightDialogue,
    err: BotError,
    lang: Language,
) -> Result<()> {
    warn!(user_id = %chat_id, error = %err, "Translation failed, aborting add wizard");
    bot.send_message(chat_id, t_lang("translation-error", lang))
        .await?;
    dialogue.exit().await?;
    Ok(())
}

/// Handle the sight name during the add wizard
pub async fn handle_add_name(
    bot: &Bot,
    msg: &Message,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    input: &str,
    mut draft: SightDraft,
    lang: Language,
) -> Result<()> {
    match synchronize_field(deps, input, lang).await {
        Ok(name) => {
            draft.name = Some(name);
            dialogue
                .update(SightDialogueState::AddDescription { draft })
                .await?;
            bot.send_message(msg.chat.id, t_lang("add-description", lang))
                .await?;
            Ok(())
        }
        Err(e) => abort_translation(bot, msg.chat.id, dialogue, e, lang).await,
    }
}

/// Handle the sight description during the add wizard
pub async fn handle_add_description(
    bot: &Bot,
    msg: &Message,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    input: &str,
    mut draft: SightDraft,
    lang: Language,
) -> Result<()> {
    match synchronize_field(deps, input, lang).await {
        Ok(description) => {
            draft.description = Some(description);
            dialogue
                .update(SightDialogueState::AddFunFact { draft })
                .await?;
            bot.send_message(msg.chat.id, t_lang("add-funfact", lang))
                .await?;
            Ok(())
        }
        Err(e) => abort_translation(bot, msg.chat.id, dialogue, e, lang).await,
    }
}

/// Handle the fun fact during the add wizard
pub async fn handle_add_funfact(
    bot: &Bot,
    msg: &Message,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    input: &str,
    mut draft: SightDraft,
    lang: Language,
) -> Result<()> {
    match synchronize_field(deps, input, lang).await {
        Ok(fun_fact) => {
            draft.fun_fact = Some(fun_fact);
            dialogue
                .update(SightDialogueState::AddPhoto { draft })
                .await?;
            bot.send_message(msg.chat.id, t_lang("add-photo", lang))
                .await?;
            Ok(())
        }
        Err(e) => abort_translation(bot, msg.chat.id, dialogue, e, lang).await,
    }
}

/// Download a photo attachment from the Telegram file API.
pub async fn download_photo(bot: &Bot, file_id: FileId) -> Result<Vec<u8>> {
    let file = bot.get_file(file_id).await?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let response = reqwest::get(&url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// Handle the photo attachment during the add wizard
pub async fn handle_add_photo(
    bot: &Bot,
    msg: &Message,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    mut draft: SightDraft,
    lang: Language,
) -> Result<()> {
    let chat_id = msg.chat.id;

    let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) else {
        bot.send_message(chat_id, t_lang("add-photo", lang)).await?;
        return Ok(());
    };

    let Some(name) = draft.name.clone() else {
        // The name step always runs first; an empty draft here is a bug
        error!(user_id = %chat_id, "Photo step reached without a captured name");
        bot.send_message(chat_id, t_lang("error", lang)).await?;
        dialogue.exit().await?;
        return Ok(());
    };

    let bytes = match download_photo(bot, largest_photo.file.id.clone()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Failed to download photo, aborting add wizard");
            bot.send_message(chat_id, t_lang("photo-error", lang))
                .await?;
            dialogue.exit().await?;
            return Ok(());
        }
    };

    let filename = photo_filename(&name);
    match deps.assets.store(&filename, &bytes) {
        Ok(()) => {
            draft.photo = Some(filename);
            dialogue
                .update(SightDialogueState::AddLocation { draft })
                .await?;
            bot.send_message(chat_id, t_lang("add-location", lang))
                .await?;
        }
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Failed to store photo, aborting add wizard");
            bot.send_message(chat_id, t_lang("photo-error", lang))
                .await?;
            dialogue.exit().await?;
        }
    }
    Ok(())
}

/// Handle the map link during the add wizard and commit the entry
pub async fn handle_add_location(
    bot: &Bot,
    msg: &Message,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    input: &str,
    draft: SightDraft,
    lang: Language,
) -> Result<()> {
    let chat_id = msg.chat.id;

    let location = match validate_location_url(input) {
        Ok(location) => location,
        Err(reason) => {
            // Recoverable: re-prompt without leaving the location state
            let err = BotError::InvalidInput(reason.to_string());
            bot.send_message(chat_id, t_lang(err.message_key(), lang))
                .await?;
            return Ok(());
        }
    };

    // Placeholder id; the store assigns the real one inside its
    // read-modify-write
    let Some(entry) = draft.into_entry(0, location) else {
        error!(user_id = %chat_id, "Location step reached with an incomplete draft");
        bot.send_message(chat_id, t_lang("error", lang)).await?;
        dialogue.exit().await?;
        return Ok(());
    };

    match deps.store.append(entry) {
        Ok(committed) => {
            info!(user_id = %chat_id, id = committed.id, "Sight committed to catalog");
            bot.send_message(chat_id, t_lang("add-success", lang))
                .await?;
        }
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Failed to save catalog");
            bot.send_message(chat_id, t_lang("error", lang)).await?;
        }
    }

    dialogue.exit().await?;
    Ok(())
}

/// Handle a search query during the delete wizard
pub async fn handle_delete_search(
    bot: &Bot,
    msg: &Message,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    input: &str,
    lang: Language,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let query = input.trim();
    let catalog = deps.store.load()?;

    match classify_matches(catalog.search_names(query)) {
        MatchOutcome::None => {
            bot.send_message(chat_id, t_args_lang("del-fail", &[("name", query)], lang))
                .await?;
            dialogue.exit().await?;
        }
        MatchOutcome::Single(sight) => {
            let prompt = t_args_lang("del-confirm", &[("name", sight.name.get(lang))], lang);
            bot.send_message(chat_id, prompt)
                .reply_markup(ui_builder::confirm_keyboard())
                .await?;
            dialogue
                .update(SightDialogueState::DeleteConfirm {
                    candidates: vec![sight],
                })
                .await?;
        }
        MatchOutcome::Multiple(matches) => {
            let mut lines = vec![t_lang("del-list", lang)];
            for (idx, sight) in matches.iter().enumerate() {
                lines.push(format!("{}. {}", idx + 1, sight.name.get(lang)));
            }
            bot.send_message(chat_id, lines.join("\n")).await?;
            // Same state again so the user can narrow the query
            bot.send_message(chat_id, t_lang("del-start", lang)).await?;
        }
    }
    Ok(())
}

/// Handle the yes/no confirmation callback of the delete wizard
#[allow(clippy::too_many_arguments)]
pub async fn handle_delete_confirm(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    dialogue: &SightDialogue,
    deps: &BotDeps,
    candidates: Vec<crate::catalog::SightEntry>,
    confirmed: bool,
    lang: Language,
) -> Result<()> {
    if !confirmed {
        edit_or_log(bot, chat_id, message_id, t_lang("del-cancel", lang)).await;
        dialogue.exit().await?;
        return Ok(());
    }

    // Confirmation is only ever offered for a single candidate; anything
    // else here means the match set changed out from under the dialog.
    let [sight] = candidates.as_slice() else {
        error!(
            user_id = %chat_id,
            candidates = candidates.len(),
            "Delete confirmed with an ambiguous candidate set"
        );
        edit_or_log(bot, chat_id, message_id, t_lang("error", lang)).await;
        dialogue.exit().await?;
        return Ok(());
    };

    if let Err(e) = deps.store.remove_by_id(sight.id) {
        error!(user_id = %chat_id, id = sight.id, error = %e, "Failed to save catalog");
        edit_or_log(bot, chat_id, message_id, t_lang("error", lang)).await;
        dialogue.exit().await?;
        return Ok(());
    }
    info!(user_id = %chat_id, id = sight.id, "Sight removed from catalog");

    // The catalog entry is gone either way; a stale photo is only noise
    if let Err(e) = deps.assets.delete(&sight.photo) {
        error!(user_id = %chat_id, photo = %sight.photo, error = %e, "Error deleting image");
    }

    edit_or_log(
        bot,
        chat_id,
        message_id,
        t_args_lang("del-success", &[("name", sight.name.get(lang))], lang),
    )
    .await;
    dialogue.exit().await?;
    Ok(())
}

async fn edit_or_log(bot: &Bot, chat_id: ChatId, message_id: MessageId, text: String) {
    if let Err(e) = bot.edit_message_text(chat_id, message_id, text).await {
        error!(user_id = %chat_id, error = %e, "Failed to edit confirmation message");
    }
}
