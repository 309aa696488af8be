//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles incoming commands, wizard text and photos
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats captions
//! - `dialogue_manager`: The add/delete wizard step handlers

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

use crate::assets::AssetStore;
use crate::catalog::CatalogStore;
use crate::config::BotConfig;
use crate::session::Sessions;
use crate::translator::Translator;

/// Collaborators shared by every handler, assembled once in `main` and
/// passed through the dispatcher as a single dependency.
pub struct BotDeps {
    pub config: BotConfig,
    pub store: CatalogStore,
    pub assets: AssetStore,
    pub translator: Box<dyn Translator>,
    pub sessions: Sessions,
}
