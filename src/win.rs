//! Winner detection and leader announcements
//!
//! After every point the scorer is checked against the winning threshold.
//! Without a winner, every fifth point overall triggers an announcement of
//! who is ahead, recomputed from the current scores each time.

use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use crate::{constants::scoring::MILESTONE_INTERVAL, id::Id, ledger::Participant};

/// A participant who reached the winning score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    /// Winning participant
    pub id: Id,
    /// Their name
    pub name: String,
    /// Their final score
    pub score: u64,
}

/// Periodic status update on who is ahead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    /// Names of everyone sharing the top score, in creation order
    pub leaders: Vec<String>,
    /// The top score
    pub score: u64,
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.iter().join(", ")),
    }
}

impl Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.leaders.as_slice() {
            [leader] => write!(f, "{leader} leads with {} points.", self.score),
            names => write!(f, "{} are tied at {} points.", join_names(names), self.score),
        }
    }
}

/// What a point changed beyond the score itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Set when the scorer reached the winning score
    pub winner: Option<Winner>,
    /// Set on announcement points when nobody won
    pub milestone: Option<Milestone>,
}

/// Checks the win condition, then the announcement rule
///
/// `winning_score == 0` disables wins. Announcements fire when
/// `total_points` is a positive multiple of five and someone has scored.
pub fn evaluate(
    participants: &[Participant],
    scorer: &Participant,
    total_points: u64,
    winning_score: u64,
) -> Verdict {
    if winning_score > 0 && scorer.score >= winning_score {
        return Verdict {
            winner: Some(Winner {
                id: scorer.id,
                name: scorer.name.clone(),
                score: scorer.score,
            }),
            milestone: None,
        };
    }

    Verdict {
        winner: None,
        milestone: milestone(participants, total_points),
    }
}

/// Builds the leader announcement due at `total_points`, if any
pub fn milestone(participants: &[Participant], total_points: u64) -> Option<Milestone> {
    if total_points == 0 || total_points % MILESTONE_INTERVAL != 0 {
        return None;
    }

    let highest = participants.iter().map(|p| p.score).max()?;
    if highest == 0 {
        return None;
    }

    Some(Milestone {
        leaders: participants
            .iter()
            .filter(|p| p.score == highest)
            .map(|p| p.name.clone())
            .collect(),
        score: highest,
    })
}
