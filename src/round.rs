//! Round state machine
//!
//! A round moves from waiting for a spin, to waiting for a time choice,
//! to drawing against the clock, to finished. From any phase but the first
//! the round can be closed, discarding the word; a finished round can be
//! retried with the same word.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    id::Id,
    timer::{self, Countdown, Tick, TimerToken},
};

/// Phase of the current round
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// No word yet; the wheel can be spun
    #[default]
    #[display("awaiting a spin")]
    AwaitingSpin,
    /// A word was drawn; the round length must be chosen
    #[display("awaiting a time choice")]
    AwaitingTimeChoice,
    /// The countdown is running
    #[display("running")]
    RoundRunning,
    /// The countdown reached zero
    #[display("finished")]
    RoundFinished,
}

/// Operations that move a round between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum Action {
    /// Set the drawn word
    #[display("set a word")]
    Begin,
    /// Pick the round length and start the clock
    #[display("choose a time")]
    ChooseTime,
    /// Close the round and go back to the wheel
    #[display("close the round")]
    Close,
    /// Play the same word again
    #[display("retry the word")]
    Retry,
}

/// Errors raised by round transitions
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The action is not allowed in the current phase
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        /// Phase the round was in
        phase: Phase,
        /// Action that was attempted
        action: Action,
    },
    /// The duration is not one of the offered choices
    #[error("{0} seconds is not an offered round length")]
    InvalidDuration(u64),
}

/// Category and word chosen for a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Category the wheel landed on
    pub category: Id,
    /// Name of that category, for display
    pub category_name: String,
    /// Word to draw
    pub word: String,
}

/// State of the round being played
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    phase: Phase,
    selection: Option<Selection>,
    duration: Option<Duration>,
    countdown: Countdown,
}

impl Round {
    /// Creates a round waiting for a spin
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drawn category and word, if any
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Chosen round length, if any
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// The round countdown
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    fn require(&self, expected: &[Phase], action: Action) -> Result<(), Error> {
        if expected.contains(&self.phase) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    /// Stores the drawn word
    ///
    /// # Errors
    ///
    /// Only allowed while awaiting a spin.
    pub fn begin(&mut self, selection: Selection) -> Result<(), Error> {
        self.require(&[Phase::AwaitingSpin], Action::Begin)?;
        self.selection = Some(selection);
        self.duration = None;
        self.phase = Phase::AwaitingTimeChoice;
        Ok(())
    }

    /// Picks the round length and starts the countdown
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - Not awaiting a time choice
    /// * `Error::InvalidDuration` - `seconds` is not an offered choice
    pub fn choose_time(&mut self, seconds: u64) -> Result<TimerToken, Error> {
        self.require(&[Phase::AwaitingTimeChoice], Action::ChooseTime)?;
        if !timer::is_valid_choice(seconds) {
            return Err(Error::InvalidDuration(seconds));
        }
        let duration = Duration::from_secs(seconds);
        self.duration = Some(duration);
        self.phase = Phase::RoundRunning;
        Ok(self.countdown.start(duration))
    }

    /// Feeds one countdown tick; expiry finishes the round
    pub fn tick(&mut self, token: TimerToken) -> Tick {
        let tick = self.countdown.tick(token);
        if tick == Tick::Expired {
            self.phase = Phase::RoundFinished;
        }
        tick
    }

    /// Discards the word and goes back to the wheel
    ///
    /// # Errors
    ///
    /// Not allowed while already awaiting a spin.
    pub fn close(&mut self) -> Result<Option<Selection>, Error> {
        self.require(
            &[
                Phase::AwaitingTimeChoice,
                Phase::RoundRunning,
                Phase::RoundFinished,
            ],
            Action::Close,
        )?;
        self.countdown.stop();
        self.duration = None;
        self.phase = Phase::AwaitingSpin;
        Ok(self.selection.take())
    }

    /// Keeps the word and asks for a new time choice
    ///
    /// # Errors
    ///
    /// Only allowed once the round has finished.
    pub fn retry(&mut self) -> Result<(), Error> {
        self.require(&[Phase::RoundFinished], Action::Retry)?;
        self.duration = None;
        self.phase = Phase::AwaitingTimeChoice;
        Ok(())
    }
}
