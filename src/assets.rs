//! # Asset Store Module
//!
//! Filesystem storage for sight photos, plus the filename derivation used
//! by the add wizard. Filenames come from the English sight name (Russian
//! when no English variant exists) so assets stay greppable on disk.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::LocalizedText;
use crate::errors::BotError;

/// Extension appended to every stored photo.
pub const PHOTO_EXTENSION: &str = "jpg";

lazy_static! {
    // Keep word characters, whitespace and hyphens; everything else drops
    static ref STRIP_PATTERN: Regex = Regex::new(r"[^\w\s-]").unwrap();
    // Runs of whitespace/hyphens collapse into one underscore
    static ref SEPARATOR_PATTERN: Regex = Regex::new(r"[-\s]+").unwrap();
}

/// Lower-case a sight name and reduce it to a safe filename stem.
pub fn sanitize_filename(name: &str) -> String {
    let stripped = STRIP_PATTERN.replace_all(name, "");
    let trimmed = stripped.trim().to_lowercase();
    SEPARATOR_PATTERN.replace_all(&trimmed, "_").into_owned()
}

/// Derive the stored photo filename from a bilingual sight name.
pub fn photo_filename(name: &LocalizedText) -> String {
    let base = if name.en.trim().is_empty() {
        &name.ru
    } else {
        &name.en
    };
    format!("{}.{}", sanitize_filename(base), PHOTO_EXTENSION)
}

/// Photo asset store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct AssetStore {
    images_dir: PathBuf,
}

impl AssetStore {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// Create the images directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.images_dir)?;
        Ok(())
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.images_dir.join(filename)
    }

    /// Store a photo under the given filename. Failure here aborts the add
    /// wizard; no catalog entry may reference a photo that was not saved.
    pub fn store(&self, filename: &str, data: &[u8]) -> Result<(), BotError> {
        let write = || -> Result<()> {
            fs::create_dir_all(&self.images_dir)?;
            fs::write(self.path_of(filename), data)?;
            Ok(())
        };
        write().map_err(|e| BotError::AssetStore(e.to_string()))?;
        debug!(filename, bytes = data.len(), "stored photo asset");
        Ok(())
    }

    /// Delete a stored photo. Callers treat failure as non-fatal.
    pub fn delete(&self, filename: &str) -> Result<(), BotError> {
        fs::remove_file(self.path_of(filename)).map_err(|e| BotError::AssetStore(e.to_string()))
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}
