//! First-guess cache
//!
//! The best opening guess depends only on the number of colors and is the most
//! expensive guess to compute (the whole code space is the pool). The cache keeps
//! one entry per color count, loaded from and flushed to a [`FirstGuessStore`].
//!
//! Entries are written once: a color count already present is never replaced,
//! since the computed opener for a given color count is always the same.

use super::error::SolverError;
use crate::core::{Code, CodeSpace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// A cached opening guess and its entropy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedGuess {
    pub guess: Code,
    pub bits: f64,
}

impl CachedGuess {
    /// Whether the entry could have been computed for `space`
    ///
    /// The guess must be a code of `space` and the entropy must lie within
    /// `0..=log2(space.size())`.
    #[must_use]
    pub fn fits(&self, space: CodeSpace) -> bool {
        let ceiling = (space.size() as f64).log2() + 1e-9;
        space.contains(&self.guess) && (0.0..=ceiling).contains(&self.bits)
    }
}

/// Cached openers keyed by number of colors
pub type FirstGuesses = BTreeMap<u8, CachedGuess>;

/// Persistence backend for the first-guess cache
pub trait FirstGuessStore: Send + Sync {
    /// Read every stored entry
    ///
    /// # Errors
    /// Returns `SolverError::Cache` if the backing resource exists but cannot be read.
    fn load(&self) -> Result<FirstGuesses, SolverError>;

    /// Persist one entry, keeping the others
    ///
    /// # Errors
    /// Returns `SolverError::Cache` if the backing resource cannot be written.
    fn store(&self, colors: u8, entry: CachedGuess) -> Result<(), SolverError>;
}

/// JSON file store: `{"4": ["AABC", 3.0437], ...}`
///
/// A missing file reads as an empty cache.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// On-disk form of one entry: `[code, bits]`
#[derive(Debug, Serialize, Deserialize)]
struct StoredGuess(String, f64);

type JsonEntries = BTreeMap<String, StoredGuess>;

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<JsonEntries, SolverError> {
        if !self.path.exists() {
            return Ok(JsonEntries::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SolverError::Cache(format!("{}: {e}", self.path.display())))?;
        if content.trim().is_empty() {
            return Ok(JsonEntries::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| SolverError::Cache(format!("{}: {e}", self.path.display())))
    }
}

impl FirstGuessStore for JsonFileStore {
    fn load(&self) -> Result<FirstGuesses, SolverError> {
        let raw = self.read_raw()?;
        let mut entries = FirstGuesses::new();
        for (key, StoredGuess(code, bits)) in raw {
            let colors: u8 = key
                .parse()
                .map_err(|_| SolverError::Cache(format!("Invalid color count '{key}'")))?;
            let guess = Code::parse(&code)?;
            entries.insert(colors, CachedGuess { guess, bits });
        }
        Ok(entries)
    }

    fn store(&self, colors: u8, entry: CachedGuess) -> Result<(), SolverError> {
        let mut raw = self.read_raw()?;
        raw.insert(
            colors.to_string(),
            StoredGuess(entry.guess.to_string(), entry.bits),
        );

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| SolverError::Cache(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(&raw)
            .map_err(|e| SolverError::Cache(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| SolverError::Cache(format!("{}: {e}", self.path.display())))
    }
}

/// In-memory store, for tests and runs that should not touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FirstGuesses>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(entries: FirstGuesses) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Snapshot of the stored entries
    #[must_use]
    pub fn entries(&self) -> FirstGuesses {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl FirstGuessStore for MemoryStore {
    fn load(&self) -> Result<FirstGuesses, SolverError> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|e| SolverError::Cache(e.to_string()))
    }

    fn store(&self, colors: u8, entry: CachedGuess) -> Result<(), SolverError> {
        self.entries
            .lock()
            .map(|mut entries| {
                entries.insert(colors, entry);
            })
            .map_err(|e| SolverError::Cache(e.to_string()))
    }
}

/// First-guess cache shared by every game of a solver
pub struct FirstGuessCache {
    entries: RwLock<FirstGuesses>,
    unsaved: Mutex<BTreeSet<u8>>,
    store: Box<dyn FirstGuessStore>,
}

impl FirstGuessCache {
    /// Empty cache backed by `store`; call [`reload`](Self::reload) to read it
    #[must_use]
    pub fn new(store: impl FirstGuessStore + 'static) -> Self {
        Self {
            entries: RwLock::new(FirstGuesses::new()),
            unsaved: Mutex::new(BTreeSet::new()),
            store: Box::new(store),
        }
    }

    /// Cache that never persists anything
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Replace the in-memory entries with the store's contents
    ///
    /// Entries computed since the last flush are kept. Stored entries that do
    /// not fit their color count's code space are dropped. On error the cache
    /// is left as it was.
    ///
    /// # Errors
    /// Returns `SolverError::Cache` if the store cannot be read.
    pub fn reload(&self) -> Result<usize, SolverError> {
        let mut loaded = self.store.load()?;
        loaded.retain(|&colors, entry| {
            let fits = CodeSpace::new(colors).is_ok_and(|space| entry.fits(space));
            if !fits {
                log::warn!(
                    "dropping cached opener {} ({:.3} bits) for {colors} colors",
                    entry.guess,
                    entry.bits
                );
            }
            fits
        });
        let mut entries = self
            .entries
            .write()
            .map_err(|e| SolverError::Cache(e.to_string()))?;
        let unsaved = self
            .unsaved
            .lock()
            .map_err(|e| SolverError::Cache(e.to_string()))?;
        for colors in unsaved.iter() {
            if let Some(&entry) = entries.get(colors) {
                loaded.insert(*colors, entry);
            }
        }
        *entries = loaded;
        log::debug!("first-guess cache holds {} entries", entries.len());
        Ok(entries.len())
    }

    /// Cached opener for `colors`, if any
    #[must_use]
    pub fn get(&self, colors: u8) -> Option<CachedGuess> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(&colors).copied())
    }

    /// Record a computed opener; returns `false` if `colors` was already cached
    pub fn insert(&self, colors: u8, entry: CachedGuess) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        if entries.contains_key(&colors) {
            return false;
        }
        entries.insert(colors, entry);
        if let Ok(mut unsaved) = self.unsaved.lock() {
            unsaved.insert(colors);
        }
        true
    }

    /// Snapshot of every cached entry
    #[must_use]
    pub fn entries(&self) -> FirstGuesses {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Write entries computed since the last flush to the store
    ///
    /// Returns the number of entries written.
    ///
    /// # Errors
    /// Returns `SolverError::Cache` if the store rejects a write; entries not
    /// yet written stay pending.
    pub fn flush(&self) -> Result<usize, SolverError> {
        let pending: Vec<u8> = {
            let mut unsaved = self
                .unsaved
                .lock()
                .map_err(|e| SolverError::Cache(e.to_string()))?;
            std::mem::take(&mut *unsaved).into_iter().collect()
        };
        let snapshot = self.entries();

        let mut written = 0;
        for (position, colors) in pending.iter().enumerate() {
            let Some(&entry) = snapshot.get(colors) else {
                continue;
            };
            if let Err(err) = self.store.store(*colors, entry) {
                if let Ok(mut unsaved) = self.unsaved.lock() {
                    unsaved.extend(&pending[position..]);
                }
                return Err(err);
            }
            written += 1;
        }
        if written > 0 {
            log::debug!("flushed {written} first-guess entries");
        }
        Ok(written)
    }
}

impl std::fmt::Debug for FirstGuessCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstGuessCache")
            .field("entries", &self.entries())
            .finish_non_exhaustive()
    }
}
