/*!
 * Persistent glossary store.
 *
 * The glossary maps normalized source phrases to per-language translations
 * and is the first stop of every resolution: a hit here means no model call.
 * It loads from a JSON document on disk, falling back to a built-in default
 * set when the file is missing or corrupt, and persists on mutation.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use parking_lot::RwLock;
use log::{debug, warn};

use crate::errors::GlossaryError;
use crate::file_utils::FileManager;
use crate::language_utils;

/// phrase -> (language -> translation)
pub type GlossaryMap = HashMap<String, HashMap<String, String>>;

/// Normalize a phrase into its glossary key form: lowercased and trimmed.
pub fn normalize_phrase(text: &str) -> String {
    text.trim().to_lowercase()
}

/// An immutable view of the glossary taken at the start of a resolution
///
/// A single resolution does all its lookups against one snapshot, so
/// concurrent writers can never produce a torn read mid-resolution.
#[derive(Debug, Clone, Default)]
pub struct GlossaryView {
    entries: Arc<GlossaryMap>,
}

impl GlossaryView {
    /// Look up the translation of a normalized phrase for a target language
    pub fn translation_for(&self, phrase: &str, language: &str) -> Option<&str> {
        let translations = self.entries.get(phrase)?;
        translations
            .iter()
            .find(|(stored_language, _)| language_utils::languages_match(stored_language, language))
            .map(|(_, translation)| translation.as_str())
    }

    /// Number of phrases in the view
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Persistent glossary store shared by all resolutions
pub struct GlossaryStore {
    /// Backing file location
    path: PathBuf,

    /// In-memory entries
    entries: Arc<RwLock<GlossaryMap>>,

    /// Resolution hit counter
    hits: Arc<RwLock<usize>>,

    /// Resolution miss counter
    misses: Arc<RwLock<usize>>,
}

impl GlossaryStore {
    /// Open a store backed by the given file
    ///
    /// A missing or corrupt file is recoverable: the store starts from the
    /// built-in default set and logs the condition instead of failing.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = match Self::load_from_file(&path) {
            Ok(map) => {
                debug!("Loaded {} glossary phrases from {:?}", map.len(), path);
                map
            }
            Err(e) => {
                warn!("Glossary unavailable ({}), starting from built-in defaults", e);
                Self::builtin_defaults()
            }
        };

        Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Create an in-memory store from explicit entries, for tests
    pub fn from_entries<P: AsRef<Path>>(path: P, entries: GlossaryMap) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: Arc::new(RwLock::new(entries)),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// The built-in default set of common phrase/language pairs
    pub fn builtin_defaults() -> GlossaryMap {
        let mut map = GlossaryMap::new();

        let defaults: &[(&str, &[(&str, &str)])] = &[
            ("hello", &[("Spanish", "hola"), ("French", "bonjour"), ("German", "hallo")]),
            ("goodbye", &[("Spanish", "adiós"), ("French", "au revoir"), ("German", "auf wiedersehen")]),
            ("thank you", &[("Spanish", "gracias"), ("French", "merci"), ("German", "danke")]),
            ("please", &[("Spanish", "por favor"), ("French", "s'il vous plaît"), ("German", "bitte")]),
            ("yes", &[("Spanish", "sí"), ("French", "oui"), ("German", "ja")]),
            ("no", &[("Spanish", "no"), ("French", "non"), ("German", "nein")]),
            ("good morning", &[("Spanish", "buenos días"), ("French", "bonjour"), ("German", "guten morgen")]),
        ];

        for (phrase, translations) in defaults {
            let per_language = translations
                .iter()
                .map(|(language, translation)| (language.to_string(), translation.to_string()))
                .collect();
            map.insert((*phrase).to_string(), per_language);
        }

        map
    }

    fn load_from_file(path: &Path) -> Result<GlossaryMap, GlossaryError> {
        if !FileManager::file_exists(path) {
            return Err(GlossaryError::ReadError(format!("no such file: {:?}", path)));
        }

        let content = FileManager::read_to_string(path)
            .map_err(|e| GlossaryError::ReadError(e.to_string()))?;

        serde_json::from_str::<GlossaryMap>(&content)
            .map_err(|e| GlossaryError::ParseError(e.to_string()))
    }

    /// Persist the current entries to the backing file
    ///
    /// Creates missing parent directories. Returns false on failure instead
    /// of raising; the caller should treat a false return as "entry not
    /// persisted, retry later".
    pub fn save(&self) -> bool {
        let snapshot = self.entries.read().clone();

        let serialized = match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize glossary: {}", e);
                return false;
            }
        };

        match FileManager::write_to_file(&self.path, &serialized) {
            Ok(()) => {
                debug!("Persisted {} glossary phrases to {:?}", snapshot.len(), self.path);
                true
            }
            Err(e) => {
                warn!("Failed to persist glossary: {}", e);
                false
            }
        }
    }

    /// Take a consistent snapshot for one resolution
    pub fn snapshot(&self) -> GlossaryView {
        GlossaryView {
            entries: Arc::new(self.entries.read().clone()),
        }
    }

    /// Insert or overwrite a translation (last-writer-wins)
    pub fn insert(&self, phrase: &str, language: &str, translation: &str) {
        let key = normalize_phrase(phrase);
        if key.is_empty() {
            return;
        }

        let mut entries = self.entries.write();
        entries
            .entry(key)
            .or_default()
            .insert(language.to_string(), translation.to_string());
    }

    /// Record that a resolution was served from the glossary
    pub fn record_hit(&self) {
        *self.hits.write() += 1;
    }

    /// Record that a resolution fell through to the model path
    pub fn record_miss(&self) {
        *self.misses.write() += 1;
    }

    /// Get resolution statistics: (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// All phrase keys currently in the store
    pub fn phrases(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Number of phrases in the store
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clone for GlossaryStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}
