//! Local persistence through an injected key/value store
//!
//! Values are JSON documents. Anything missing, malformed or failing
//! validation is replaced by its default and logged; storage problems are
//! never surfaced to the players.

use std::collections::HashMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    category::{Category, CategoryBook},
    config::Mode,
    constants::storage::{AI_IMAGES_KEY, CATEGORIES_KEY, MODE_KEY, PARTICIPANTS_KEY},
    ledger::Participant,
};

/// String key/value storage, such as a browser's local storage
pub trait Store {
    /// Reads the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value stored under `key`
    fn set(&mut self, key: &str, value: String);
}

/// A [`Store`] kept in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }
}

/// Pieces of state that are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// The category list
    Categories,
    /// The participant list
    Participants,
    /// The team/player mode
    Mode,
    /// Whether reference images are requested
    AiImages,
}

impl Key {
    /// Name of the key in the store
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categories => CATEGORIES_KEY,
            Self::Participants => PARTICIPANTS_KEY,
            Self::Mode => MODE_KEY,
            Self::AiImages => AI_IMAGES_KEY,
        }
    }
}

/// Everything restored from the store at start-up
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Categories, or the built-in set
    pub categories: CategoryBook,
    /// Participants, possibly empty
    pub participants: Vec<Participant>,
    /// Team/player mode
    pub mode: Mode,
    /// Reference image preference
    pub ai_images: bool,
}

fn read<S: Store + ?Sized, T: DeserializeOwned>(store: &S, key: Key) -> Option<T> {
    let raw = store.get(key.as_str())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key = key.as_str(), %error, "discarding malformed stored value");
            None
        }
    }
}

/// Loads the category list, falling back to the built-in set
///
/// An empty list counts as missing.
pub fn load_categories<S: Store + ?Sized>(store: &S) -> CategoryBook {
    let Some(categories) = read::<_, Vec<Category>>(store, Key::Categories) else {
        return CategoryBook::defaults();
    };
    if categories.is_empty() {
        return CategoryBook::defaults();
    }
    CategoryBook::from_categories(categories).unwrap_or_else(|error| {
        warn!(%error, "stored categories are invalid, using defaults");
        CategoryBook::defaults()
    })
}

/// Loads the participant list, falling back to an empty one
pub fn load_participants<S: Store + ?Sized>(store: &S) -> Vec<Participant> {
    read(store, Key::Participants).unwrap_or_default()
}

/// Loads everything persisted
pub fn load<S: Store + ?Sized>(store: &S) -> Snapshot {
    Snapshot {
        categories: load_categories(store),
        participants: load_participants(store),
        mode: read(store, Key::Mode).unwrap_or_default(),
        ai_images: read(store, Key::AiImages).unwrap_or_default(),
    }
}

/// Writes one value as JSON
pub fn write<S: Store + ?Sized, T: Serialize + ?Sized>(store: &mut S, key: Key, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key.as_str(), json),
        Err(error) => warn!(key = key.as_str(), %error, "could not encode value for storage"),
    }
}
