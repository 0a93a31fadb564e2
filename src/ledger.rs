//! Score ledger
//!
//! This module tracks teams or players, their colors and scores, and the
//! running total of points scored since the last reset. Awarding a point
//! also runs the win evaluator so callers get the whole outcome at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    constants::participant::PALETTE,
    id::Id,
    names::{self, Names},
    win::{self, Verdict},
};

/// A team or player taking part in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier
    pub id: Id,
    /// Display name, unique ignoring case
    pub name: String,
    /// Points scored since the last reset
    pub score: u64,
    /// Color assigned at creation
    pub color: String,
}

/// Errors raised by ledger operations
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The name was rejected
    #[error(transparent)]
    Name(#[from] names::Error),
    /// No participant has the given identifier
    #[error("participant not found")]
    UnknownParticipant,
}

/// Result of awarding one point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    /// Participant who scored
    pub participant: Id,
    /// Their new score
    pub score: u64,
    /// Points scored by everyone since the last reset
    pub total_points: u64,
    /// Winner and announcement, if any
    pub verdict: Verdict,
}

/// Scores of every participant
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Participants in creation order
    participants: Vec<Participant>,
    /// Name uniqueness index
    names: Names,
    /// Points scored since the last reset
    total_points: u64,
}

impl Ledger {
    /// Rebuilds a ledger from stored participants
    ///
    /// Entries whose name is invalid or duplicated, or whose identifier is
    /// repeated, are dropped. The running total starts at zero.
    pub fn from_participants(participants: Vec<Participant>) -> Self {
        let mut ledger = Self::default();
        for mut participant in participants {
            if ledger.get(participant.id).is_some() {
                warn!(id = %participant.id, "dropping participant with repeated id");
                continue;
            }
            match ledger.names.set_name(participant.id, &participant.name) {
                Ok(name) => participant.name = name,
                Err(error) => {
                    warn!(id = %participant.id, %error, "dropping stored participant");
                    continue;
                }
            }
            if participant.color.is_empty() {
                participant.color = ledger.next_color().to_owned();
            }
            ledger.participants.push(participant);
        }
        ledger
    }

    /// All participants in creation order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Looks up a participant
    pub fn get(&self, id: Id) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Points scored since the last reset
    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Name index, for suggestions
    pub fn names(&self) -> &Names {
        &self.names
    }

    fn next_color(&self) -> &'static str {
        PALETTE[self.participants.len() % PALETTE.len()]
    }

    /// Adds a participant with a zero score
    ///
    /// # Errors
    ///
    /// Returns `Error::Name` when the name is empty, too long,
    /// inappropriate or already taken (ignoring case).
    pub fn add(&mut self, name: &str) -> Result<&Participant, Error> {
        let id = Id::new();
        let name = self.names.set_name(id, name)?;
        let color = self.next_color().to_owned();
        debug!(%id, %name, %color, "participant added");
        self.participants.push(Participant {
            id,
            name,
            score: 0,
            color,
        });
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Renames a participant, keeping score and color
    ///
    /// # Errors
    ///
    /// `Error::UnknownParticipant`, or `Error::Name` for a rejected name.
    pub fn rename(&mut self, id: Id, name: &str) -> Result<String, Error> {
        let position = self.position(id)?;
        let name = self.names.set_name(id, name)?;
        name.clone_into(&mut self.participants[position].name);
        Ok(name)
    }

    /// Removes a participant; other scores are untouched
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownParticipant` when the identifier is not present.
    pub fn remove(&mut self, id: Id) -> Result<Participant, Error> {
        let position = self.position(id)?;
        self.names.remove(&id)?;
        Ok(self.participants.remove(position))
    }

    /// Awards one point and evaluates the win condition
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownParticipant` when the identifier is not present.
    pub fn award_point(&mut self, id: Id, winning_score: u64) -> Result<ScoreOutcome, Error> {
        let position = self.position(id)?;
        self.participants[position].score += 1;
        self.total_points += 1;

        let scorer = &self.participants[position];
        let verdict = win::evaluate(&self.participants, scorer, self.total_points, winning_score);

        Ok(ScoreOutcome {
            participant: id,
            score: scorer.score,
            total_points: self.total_points,
            verdict,
        })
    }

    /// Sets every score and the running total to zero
    pub fn reset_scores(&mut self) {
        for participant in &mut self.participants {
            participant.score = 0;
        }
        self.total_points = 0;
    }

    fn position(&self, id: Id) -> Result<usize, Error> {
        self.participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::UnknownParticipant)
    }
}
