//! # Bot Configuration Module
//!
//! Immutable configuration assembled once at startup from the environment
//! and injected into the handlers. Nothing here changes after boot.

use std::env;
use std::path::PathBuf;

// Defaults mirrored by the .env.example
pub const DEFAULT_SIGHTS_FILE: &str = "sights.json";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Configuration for the sights bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram user ids allowed to run /add and /del
    pub allowlist: Vec<u64>,
    /// Path of the persisted catalog document
    pub sights_file: PathBuf,
    /// Directory holding the photo assets
    pub images_dir: PathBuf,
    /// Page size for the /list browser
    pub items_per_page: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            allowlist: Vec::new(),
            sights_file: PathBuf::from(DEFAULT_SIGHTS_FILE),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl BotConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset. `ALLOWED_USER_IDS` is a comma-separated
    /// list of numeric Telegram user ids; entries that fail to parse are
    /// ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let allowlist = env::var("ALLOWED_USER_IDS")
            .map(|raw| parse_allowlist(&raw))
            .unwrap_or_default();

        let sights_file = env::var("SIGHTS_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.sights_file);

        let images_dir = env::var("IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.images_dir);

        let items_per_page = env::var("ITEMS_PER_PAGE")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.items_per_page);

        Self {
            allowlist,
            sights_file,
            images_dir,
            items_per_page,
        }
    }

    /// Whether this user may run the privileged add/delete wizards.
    pub fn is_allowed(&self, user_id: u64) -> bool {
        self.allowlist.contains(&user_id)
    }
}

fn parse_allowlist(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}
