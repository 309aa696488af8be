//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use rand::seq::SliceRandom;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ParseMode};
use tracing::{debug, error, warn};

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import catalog and pagination
use crate::catalog::Catalog;
use crate::errors::BotError;
use crate::pagination;

// Import dialogue types
use crate::dialogue::{SightDialogue, SightDialogueState};

// Import dialogue manager functions
use super::dialogue_manager::{
    handle_add_description, handle_add_funfact, handle_add_location, handle_add_name,
    handle_add_photo, handle_delete_search,
};

// Import UI builder functions
use super::ui_builder;
use super::BotDeps;

use crate::language::Language;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    deps: Arc<BotDeps>,
    dialogue: SightDialogue,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let lang = deps.sessions.language(chat_id);

    // Whatever goes wrong below, the user gets the generic error message
    // and the dispatcher keeps serving other chats.
    if let Err(e) = dispatch_message(&bot, &msg, &deps, dialogue).await {
        error!(user_id = %chat_id, error = %e, "Message handling failed");
        if let Err(send_err) = bot.send_message(chat_id, t_lang("error", lang)).await {
            error!(user_id = %chat_id, error = %send_err, "Failed to send error message");
        }
    }
    Ok(())
}

async fn dispatch_message(
    bot: &Bot,
    msg: &Message,
    deps: &BotDeps,
    dialogue: SightDialogue,
) -> Result<()> {
    if let Some(text) = msg.text() {
        handle_text_message(bot, msg, text, deps, dialogue).await
    } else if msg.photo().is_some() {
        handle_photo_message(bot, msg, deps, dialogue).await
    } else {
        handle_unsupported_message(bot, msg, deps).await
    }
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    text: &str,
    deps: &BotDeps,
    dialogue: SightDialogue,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let lang = deps.sessions.language(chat_id);
    debug!(user_id = %chat_id, message_length = text.len(), "Received text message from user");

    // Commands interrupt or bypass wizards; plain text feeds them.
    if text.starts_with('/') {
        return handle_command(bot, msg, text, deps, dialogue, lang).await;
    }

    let state = dialogue.get().await?.unwrap_or_default();
    match state {
        SightDialogueState::AddName { draft } => {
            handle_add_name(bot, msg, &dialogue, deps, text, draft, lang).await
        }
        SightDialogueState::AddDescription { draft } => {
            handle_add_description(bot, msg, &dialogue, deps, text, draft, lang).await
        }
        SightDialogueState::AddFunFact { draft } => {
            handle_add_funfact(bot, msg, &dialogue, deps, text, draft, lang).await
        }
        SightDialogueState::AddPhoto { .. } => {
            // Still waiting for an attachment
            bot.send_message(chat_id, t_lang("add-photo", lang)).await?;
            Ok(())
        }
        SightDialogueState::AddLocation { draft } => {
            handle_add_location(bot, msg, &dialogue, deps, text, draft, lang).await
        }
        SightDialogueState::DeleteSearch => {
            handle_delete_search(bot, msg, &dialogue, deps, text, lang).await
        }
        SightDialogueState::DeleteConfirm { .. } => {
            debug!(user_id = %chat_id, "Ignoring text while waiting for delete confirmation");
            Ok(())
        }
        SightDialogueState::Idle => {
            bot.send_message(chat_id, t_lang("text-hint", lang)).await?;
            Ok(())
        }
    }
}

async fn handle_command(
    bot: &Bot,
    msg: &Message,
    text: &str,
    deps: &BotDeps,
    dialogue: SightDialogue,
    lang: Language,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let user_id = msg.from.as_ref().map(|user| user.id.0);

    match text {
        "/start" => {
            bot.send_message(chat_id, t_lang("welcome", lang))
                .reply_markup(ui_builder::language_keyboard())
                .await?;
        }
        "/help" => {
            let allowed = user_id.is_some_and(|id| deps.config.is_allowed(id));
            let key = if allowed { "help" } else { "help-basic" };
            bot.send_message(chat_id, t_lang(key, lang)).await?;
        }
        "/lang" => {
            bot.send_message(chat_id, t_lang("lang-change", lang))
                .reply_markup(ui_builder::language_keyboard())
                .await?;
        }
        "/dev" => {
            bot.send_message(chat_id, t_lang("dev-info", lang)).await?;
        }
        "/rand" => {
            handle_random_sight(bot, chat_id, deps, lang).await?;
        }
        "/list" => {
            let catalog = deps.store.load()?;
            if catalog.is_empty() {
                bot.send_message(chat_id, t_lang(BotError::EmptyCatalog.message_key(), lang))
                    .await?;
            } else {
                deps.sessions.set_current_page(chat_id, 0);
                send_sight_list(bot, chat_id, None, &catalog, 0, deps, lang).await?;
            }
        }
        "/add" => {
            if user_id.is_some_and(|id| deps.config.is_allowed(id)) {
                dialogue
                    .update(SightDialogueState::AddName {
                        draft: Default::default(),
                    })
                    .await?;
                bot.send_message(chat_id, t_lang("add-name", lang)).await?;
            } else {
                warn!(user_id = ?user_id, "Denied /add for non-allow-listed user");
                bot.send_message(chat_id, t_lang(BotError::PermissionDenied.message_key(), lang))
                    .await?;
            }
        }
        "/del" => {
            if user_id.is_some_and(|id| deps.config.is_allowed(id)) {
                dialogue.update(SightDialogueState::DeleteSearch).await?;
                bot.send_message(chat_id, t_lang("del-start", lang)).await?;
            } else {
                warn!(user_id = ?user_id, "Denied /del for non-allow-listed user");
                bot.send_message(chat_id, t_lang(BotError::PermissionDenied.message_key(), lang))
                    .await?;
            }
        }
        "/cancel" => {
            let active = dialogue
                .get()
                .await?
                .map(|state| state.in_conversation())
                .unwrap_or(false);
            if active {
                dialogue.exit().await?;
            }
            bot.send_message(chat_id, t_lang("cancel", lang)).await?;
        }
        other => {
            debug!(user_id = %chat_id, command = %other, "Ignoring unknown command");
        }
    }

    Ok(())
}

async fn handle_random_sight(
    bot: &Bot,
    chat_id: ChatId,
    deps: &BotDeps,
    lang: Language,
) -> Result<()> {
    let catalog = deps.store.load()?;

    let sight = {
        let mut rng = rand::thread_rng();
        catalog.sights.choose(&mut rng).cloned()
    };
    let Some(sight) = sight else {
        bot.send_message(chat_id, t_lang(BotError::EmptyCatalog.message_key(), lang))
            .await?;
        return Ok(());
    };

    let caption = ui_builder::sight_caption(&sight, lang);
    let keyboard = ui_builder::location_keyboard(&sight, lang);
    send_photo_with_text_fallback(bot, chat_id, deps, &sight.photo, caption, keyboard).await
}

/// Send a sight photo with a caption, degrading to a text-only message if
/// the asset cannot be sent.
pub async fn send_photo_with_text_fallback(
    bot: &Bot,
    chat_id: ChatId,
    deps: &BotDeps,
    photo: &str,
    caption: String,
    keyboard: teloxide::types::InlineKeyboardMarkup,
) -> Result<()> {
    let photo_path = deps.assets.path_of(photo);
    match bot
        .send_photo(chat_id, InputFile::file(photo_path))
        .caption(caption.clone())
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(keyboard.clone())
        .await
    {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(user_id = %chat_id, photo = %photo, error = %e, "Photo send failed, falling back to text");
            bot.send_message(chat_id, caption)
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(keyboard)
                .await?;
            Ok(())
        }
    }
}

/// Render one list page, editing an existing message when navigating via
/// buttons and sending a fresh one for the /list command.
pub async fn send_sight_list(
    bot: &Bot,
    chat_id: ChatId,
    edit: Option<MessageId>,
    catalog: &Catalog,
    page: usize,
    deps: &BotDeps,
    lang: Language,
) -> Result<()> {
    let view = pagination::render_page(catalog, page, deps.config.items_per_page);
    let text = t_args_lang("list-title", &[("page", &(page + 1).to_string())], lang);
    let keyboard = ui_builder::list_keyboard(&view, page, deps.config.items_per_page, lang);

    match edit {
        Some(message_id) => {
            if let Err(e) = bot
                .edit_message_text(chat_id, message_id, text.clone())
                .reply_markup(keyboard.clone())
                .await
            {
                // Telegram rejects edits of photo messages and no-op edits
                if e.to_string().to_lowercase().contains("not modified") {
                    return Ok(());
                }
                debug!(user_id = %chat_id, error = %e, "List edit failed, sending a new message");
                bot.send_message(chat_id, text).reply_markup(keyboard).await?;
            }
        }
        None => {
            bot.send_message(chat_id, text).reply_markup(keyboard).await?;
        }
    }

    Ok(())
}

/// Detail view for one sight, always as a new message below the list.
pub async fn send_sight_details(
    bot: &Bot,
    chat_id: ChatId,
    deps: &BotDeps,
    sight: &crate::catalog::SightEntry,
    lang: Language,
) -> Result<()> {
    let caption = ui_builder::sight_caption(sight, lang);
    let keyboard = ui_builder::detail_keyboard(sight, lang);
    send_photo_with_text_fallback(bot, chat_id, deps, &sight.photo, caption, keyboard).await
}

async fn handle_photo_message(
    bot: &Bot,
    msg: &Message,
    deps: &BotDeps,
    dialogue: SightDialogue,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let lang = deps.sessions.language(chat_id);
    debug!(user_id = %chat_id, "Received photo message from user");

    match dialogue.get().await?.unwrap_or_default() {
        SightDialogueState::AddPhoto { draft } => {
            handle_add_photo(bot, msg, &dialogue, deps, draft, lang).await
        }
        _ => {
            // Photos only matter inside the add wizard
            bot.send_message(chat_id, t_lang("unsupported-hint", lang))
                .await?;
            Ok(())
        }
    }
}

async fn handle_unsupported_message(bot: &Bot, msg: &Message, deps: &BotDeps) -> Result<()> {
    let chat_id = msg.chat.id;
    let lang = deps.sessions.language(chat_id);
    debug!(user_id = %chat_id, "Received unsupported message type from user");

    bot.send_message(chat_id, t_lang("unsupported-hint", lang))
        .await?;
    Ok(())
}
