//! Game settings chosen by the host
//!
//! Settings are validated with `garde`: the winning score must be one of
//! the offered thresholds.

use enum_map::{Enum, EnumMap, enum_map};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants::scoring::WINNING_SCORES;

/// Whether participants are teams or individual players
///
/// The mode only changes the words used in messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Participants are teams
    #[default]
    Teams,
    /// Participants are individual players
    Players,
}

/// Nouns used to talk about participants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    /// "team" or "player"
    pub singular: &'static str,
    /// "teams" or "players"
    pub plural: &'static str,
}

impl Mode {
    /// Nouns for this mode
    pub fn vocabulary(self) -> Vocabulary {
        let table: EnumMap<Mode, Vocabulary> = enum_map! {
            Mode::Teams => Vocabulary { singular: "team", plural: "teams" },
            Mode::Players => Vocabulary { singular: "player", plural: "players" },
        };
        table[self]
    }
}

type ValidationResult = garde::Result;

/// Validates that a winning score is one of the offered thresholds
fn validate_winning_score(val: &u64, _ctx: &()) -> ValidationResult {
    if WINNING_SCORES.contains(val) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "winning score must be one of {WINNING_SCORES:?}"
        )))
    }
}

/// Host-selected options for a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// Team or player vocabulary
    #[garde(skip)]
    pub mode: Mode,
    /// Score that wins the game; zero disables automatic wins
    #[garde(custom(validate_winning_score))]
    pub winning_score: u64,
    /// Whether to request reference images for drawn words
    #[garde(skip)]
    pub ai_images: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            winning_score: 0,
            ai_images: false,
        }
    }
}

impl Settings {
    /// Whether a winner can be declared automatically
    pub fn has_win_condition(&self) -> bool {
        self.winning_score > 0
    }
}
