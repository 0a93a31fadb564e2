//! Participant name management and validation
//!
//! This module keeps team and player names unique (ignoring case), filters
//! inappropriate content, and suggests playful names when the host wants
//! one.

use std::collections::{HashMap, HashSet};

use heck::ToTitleCase;
use rustrict::CensorStr;
use serde::Serialize;
use thiserror::Error;

use crate::{config::Mode, constants::participant::MAX_NAME_LENGTH, id::Id};

/// Errors that can occur during name validation and assignment
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested name is already in use by another participant
    #[error("name already in-use")]
    Used,
    /// The name is empty or contains only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The name contains inappropriate content
    #[error("name is inappropriate")]
    Sinful,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
    /// No participant has the given identifier
    #[error("participant not found")]
    Unknown,
}

/// Names of all current participants
///
/// Uniqueness is checked on the lowercased, trimmed name, so "Rojos" and
/// "rojos" cannot both exist.
#[derive(Debug, Default, Clone)]
pub struct Names {
    /// Primary mapping from participant ID to name
    mapping: HashMap<Id, String>,

    /// Lowercased names in use
    existing: HashSet<String>,
}

/// Cleans a requested name and checks it in isolation
///
/// # Errors
///
/// * `Error::Empty` - Name is empty after trimming whitespace
/// * `Error::TooLong` - Name exceeds the maximum length
/// * `Error::Sinful` - Name contains inappropriate content
pub fn clean(name: &str) -> Result<String, Error> {
    let name = rustrict::trim_whitespace(name);
    if name.is_empty() {
        return Err(Error::Empty);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::TooLong);
    }
    if name.is_inappropriate() {
        return Err(Error::Sinful);
    }
    Ok(name.to_owned())
}

impl Names {
    /// Whether a name is taken, ignoring case
    pub fn is_taken(&self, name: &str) -> bool {
        self.existing.contains(&rustrict::trim_whitespace(name).to_lowercase())
    }

    /// Assigns a name to a new participant after validation
    ///
    /// # Returns
    ///
    /// The cleaned name that was stored.
    ///
    /// # Errors
    ///
    /// The errors of [`clean`], plus `Error::Used` when the name (ignoring
    /// case) belongs to another participant.
    pub fn set_name(&mut self, id: Id, name: &str) -> Result<String, Error> {
        let name = clean(name)?;
        let key = name.to_lowercase();
        let own = self.mapping.get(&id).map(|n| n.to_lowercase());
        if own.as_deref() != Some(key.as_str()) && self.existing.contains(&key) {
            return Err(Error::Used);
        }
        if let Some(previous) = own {
            self.existing.remove(&previous);
        }
        self.existing.insert(key);
        self.mapping.insert(id, name.clone());
        Ok(name)
    }

    /// Frees the name of a removed participant
    ///
    /// # Errors
    ///
    /// Returns `Error::Unknown` when the participant has no name.
    pub fn remove(&mut self, id: &Id) -> Result<String, Error> {
        let name = self.mapping.remove(id).ok_or(Error::Unknown)?;
        self.existing.remove(&name.to_lowercase());
        Ok(name)
    }
}

/// Generates a random pet-style name ("Brave Otter")
///
/// Team names are pluralized ("Brave Otters").
pub fn suggest(mode: Mode) -> String {
    let name = petname::petname(2, " ")
        .unwrap_or_else(|| "Mystery Artist".to_owned())
        .to_title_case();
    match mode {
        Mode::Teams => pluralizer::pluralize(&name, 2, false),
        Mode::Players => name,
    }
}

/// Suggests a name not yet taken, giving up after a few attempts
pub fn suggest_unique(names: &Names, mode: Mode) -> Option<String> {
    (0..16)
        .map(|_| suggest(mode))
        .find(|name| !names.is_taken(name) && clean(name).is_ok())
}
