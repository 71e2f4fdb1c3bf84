//! Catalog loading - reads the topic corpus from a JSON file with a
//! built-in fallback.
//!
//! The catalog is loaded once at startup and never mutated. A corpus
//! file at `DATA_DIR/content/topics.json` overrides the compiled-in
//! seed, which keeps the content swappable without a rebuild.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::seed_catalog;
use crate::domain::{Flashcard, ScheduleSlot, Topic};

/// The immutable topic corpus plus its presentation extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    pub topics: Vec<Topic>,
    /// Recommended study schedule, shown by the UI as-is.
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
}

impl Catalog {
    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn flashcard(&self, topic_id: &str, index: usize) -> Option<&Flashcard> {
        self.topic(topic_id)?.flashcards.get(index)
    }

    pub fn total_cards(&self) -> usize {
        self.topics.iter().map(|t| t.flashcards.len()).sum()
    }
}

/// Load the catalog from `path`, falling back to the built-in corpus.
///
/// A missing file is the normal case and logs at debug; an unreadable
/// or unparseable file is worth a warning but never fatal.
pub fn load_catalog(path: &Path) -> Catalog {
    match load_catalog_file(path) {
        Ok(catalog) => {
            tracing::info!(
                "loaded catalog '{}' with {} topics from {}",
                catalog.title,
                catalog.topics.len(),
                path.display()
            );
            catalog
        }
        Err(CatalogLoadError::FileNotFound(_)) => {
            tracing::debug!("no catalog file at {}, using built-in corpus", path.display());
            seed_catalog()
        }
        Err(e) => {
            tracing::warn!("falling back to built-in corpus: {}", e);
            seed_catalog()
        }
    }
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogLoadError> {
    if !path.exists() {
        return Err(CatalogLoadError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CatalogLoadError::IoError(path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&content)
        .map_err(|e| CatalogLoadError::ParseError(path.display().to_string(), e.to_string()))
}

/// Catalog loading errors.
#[derive(Debug)]
pub enum CatalogLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLoadError::FileNotFound(path) => write!(f, "Catalog file not found: {}", path),
            CatalogLoadError::IoError(path, err) => write!(f, "IO error reading {}: {}", path, err),
            CatalogLoadError::ParseError(path, err) => {
                write!(f, "Parse error in {}: {}", path, err)
            }
        }
    }
}

impl std::error::Error for CatalogLoadError {}

impl CatalogLoadError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogLoadError::FileNotFound(_) => "Catalog file not found",
            CatalogLoadError::IoError(_, _) => "Failed to read catalog file",
            CatalogLoadError::ParseError(_, _) => "Failed to parse catalog file",
        }
    }
}
