//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use tracing::{debug, error, warn};

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import dialogue types
use crate::dialogue::{SightDialogue, SightDialogueState};

use crate::errors::BotError;
use crate::language::Language;
use crate::pagination;

// Import shared senders
use super::message_handler::{send_sight_details, send_sight_list};

use super::dialogue_manager::handle_delete_confirm;
use super::BotDeps;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    deps: Arc<BotDeps>,
    dialogue: SightDialogue,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    bot.answer_callback_query(q.id.clone()).await?;

    let Some(msg) = &q.message else {
        debug!(user_id = %q.from.id, "Callback without an accessible message");
        return Ok(());
    };
    let chat_id = msg.chat().id;
    let message_id = msg.id();
    let lang = deps.sessions.language(chat_id);

    if let Err(e) = dispatch_callback(&bot, &q, chat_id, message_id, &deps, dialogue, lang).await {
        error!(user_id = %chat_id, error = %e, "Callback handling failed");
        if let Err(send_err) = bot.send_message(chat_id, t_lang("error", lang)).await {
            error!(user_id = %chat_id, error = %send_err, "Failed to send error message");
        }
    }
    Ok(())
}

async fn dispatch_callback(
    bot: &Bot,
    q: &teloxide::types::CallbackQuery,
    chat_id: ChatId,
    message_id: MessageId,
    deps: &BotDeps,
    dialogue: SightDialogue,
    lang: Language,
) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("");

    if let Ok(chosen) = data.parse::<Language>() {
        handle_language_selection(bot, chat_id, message_id, deps, chosen).await
    } else if data == "del_confirm" || data == "del_cancel" {
        match dialogue.get().await?.unwrap_or_default() {
            SightDialogueState::DeleteConfirm { candidates } => {
                handle_delete_confirm(
                    bot,
                    chat_id,
                    message_id,
                    &dialogue,
                    deps,
                    candidates,
                    data == "del_confirm",
                    lang,
                )
                .await
            }
            _ => {
                // Stale button from an already finished conversation
                debug!(user_id = %chat_id, "Delete confirmation outside an active delete wizard");
                Ok(())
            }
        }
    } else if let Some(page) = data.strip_prefix("page_") {
        let Ok(page) = page.parse::<usize>() else {
            warn!(user_id = %chat_id, data = %data, "Malformed page callback");
            return Ok(());
        };
        deps.sessions.set_current_page(chat_id, page);
        let catalog = deps.store.load()?;
        send_sight_list(bot, chat_id, Some(message_id), &catalog, page, deps, lang).await
    } else if let Some(id) = data.strip_prefix("details_") {
        let Ok(id) = id.parse::<u32>() else {
            warn!(user_id = %chat_id, data = %data, "Malformed details callback");
            return Ok(());
        };
        let catalog = deps.store.load()?;
        match pagination::render_detail(&catalog, id) {
            Ok(sight) => send_sight_details(bot, chat_id, deps, sight, lang).await,
            Err(e) => {
                // The entry was deleted under a stale list view
                warn!(user_id = %chat_id, error = %e, "Detail lookup failed");
                bot.send_message(chat_id, t_lang(e.message_key(), lang))
                    .await?;
                Ok(())
            }
        }
    } else if data == "back_to_list" {
        let page = deps.sessions.current_page(chat_id);
        let catalog = deps.store.load()?;
        if catalog.is_empty() {
            bot.send_message(chat_id, t_lang(BotError::EmptyCatalog.message_key(), lang))
                .await?;
            return Ok(());
        }
        // The detail view is a photo message, so the edit fails and the
        // list arrives as a new message below it
        send_sight_list(bot, chat_id, Some(message_id), &catalog, page, deps, lang).await
    } else {
        debug!(user_id = %chat_id, data = %data, "Ignoring unknown callback");
        Ok(())
    }
}

async fn handle_language_selection(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    deps: &BotDeps,
    chosen: Language,
) -> Result<()> {
    deps.sessions.set_language(chat_id, chosen);

    let confirmation = t_args_lang(
        "lang-set",
        &[("lang", chosen.code().to_uppercase().as_str())],
        chosen,
    );
    if let Err(e) = bot.edit_message_text(chat_id, message_id, confirmation).await {
        error!(user_id = %chat_id, error = %e, "Failed to edit language prompt");
    }

    bot.send_message(chat_id, t_lang("start-message", chosen))
        .await?;
    Ok(())
}
