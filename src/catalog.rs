//! # Catalog Module
//!
//! The sight catalog and its file-backed store. The persisted form is a
//! single JSON document `{ "sights": [...] }` that is reloaded before every
//! read and rewritten whole (via a temp file rename) on every mutation, so
//! no in-memory copy survives across user turns.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::language::Language;

/// A text field carried in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ru: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ru: ru.into(),
        }
    }

    /// Build from user input plus its translation, keyed by the input language.
    pub fn from_pair(source: Language, original: String, translated: String) -> Self {
        match source {
            Language::En => Self {
                en: original,
                ru: translated,
            },
            Language::Ru => Self {
                en: translated,
                ru: original,
            },
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Ru => &self.ru,
        }
    }

    /// Case-insensitive substring match against either variant.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.en.to_lowercase().contains(&needle) || self.ru.to_lowercase().contains(&needle)
    }
}

/// One catalog record describing a point of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightEntry {
    pub id: u32,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub fun_fact: LocalizedText,
    /// Filename of the photo inside the images directory
    pub photo: String,
    /// Map link, always an http(s) URL
    pub location: String,
}

/// Ordered collection of sights; insertion order is display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub sights: Vec<SightEntry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.sights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sights.is_empty()
    }

    /// The id assigned to the next appended entry. Ids grow monotonically
    /// from the current maximum and are never reused after a deletion.
    pub fn next_id(&self) -> u32 {
        self.sights.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    pub fn find_by_id(&self, id: u32) -> Option<&SightEntry> {
        self.sights.iter().find(|s| s.id == id)
    }

    /// All entries whose name matches the query in either language,
    /// in catalog order.
    pub fn search_names(&self, query: &str) -> Vec<SightEntry> {
        self.sights
            .iter()
            .filter(|s| s.name.contains_ignore_case(query))
            .cloned()
            .collect()
    }
}

/// File-backed catalog store. Each mutating call performs a full
/// read-modify-write; the document is replaced atomically by renaming a
/// temp file over it, so readers never observe a partial write.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog from disk. A missing file is an empty catalog.
    pub fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let catalog = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(catalog)
    }

    /// Append an entry, assigning its id inside the read-modify-write so
    /// concurrent turns never hand out the same id twice within one call.
    /// Returns the committed entry.
    pub fn append(&self, mut entry: SightEntry) -> Result<SightEntry> {
        let mut catalog = self.load()?;
        entry.id = catalog.next_id();
        catalog.sights.push(entry.clone());
        self.save(&catalog)?;
        debug!(id = entry.id, "appended sight to catalog");
        Ok(entry)
    }

    /// Remove the entry with this id. Removing an unknown id is a no-op.
    pub fn remove_by_id(&self, id: u32) -> Result<()> {
        let mut catalog = self.load()?;
        catalog.sights.retain(|s| s.id != id);
        self.save(&catalog)?;
        debug!(id, "removed sight from catalog");
        Ok(())
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new_in("."),
        }
        .context("failed to create temp file for catalog write")?;

        let json = serde_json::to_string_pretty(catalog)?;
        tmp.write_all(json.as_bytes())
            .context("failed to write catalog")?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
