//! Core game logic and state management
//!
//! This module contains the [`Game`] struct, which owns the category book,
//! word history, score ledger, wheel and round, and exposes every player
//! and host action. Each action returns the [`Effect`]s the caller should
//! carry out; rejected actions return an [`Error`] and change nothing.

use std::fmt::Debug;

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use web_time::{Duration, Instant};

use crate::{
    Alarm, Announcement, Cue, DrawnWord, Effect, ImageRequest, Notice,
    category::{self, CategoryBook},
    config::{Mode, Settings},
    id::Id,
    ledger::{self, Ledger, Participant},
    names,
    random::{self, RandomSource},
    round::{self, Action, Phase, Round, Selection},
    storage::{self, Key, Store},
    timer::{Tick, TimerToken},
    wheel::{self, Wheel},
    win::Winner,
    word_pool::{self, UsedWords},
};

/// Errors raised by game actions
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A category or word edit was rejected
    #[error(transparent)]
    Category(#[from] category::Error),
    /// A participant edit or score change was rejected
    #[error(transparent)]
    Ledger(#[from] ledger::Error),
    /// The wheel refused to spin
    #[error(transparent)]
    Wheel(#[from] wheel::Error),
    /// The round is in the wrong phase
    #[error(transparent)]
    Round(#[from] round::Error),
    /// A setting failed validation
    #[error("invalid settings: {0}")]
    Settings(String),
    /// Points are frozen until the winner is dismissed or scores are reset
    #[error("the game already has a winner")]
    WinnerDeclared,
}

/// Actions sent by the players or the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum IncomingMessage {
    /// Spin the wheel
    Spin,
    /// Start the round clock with this many seconds
    ChooseTime(u64),
    /// Close the round and go back to the wheel
    CloseRound,
    /// Play the same word again
    Retry,
    /// Give one point to a participant
    AwardPoint(Id),
    /// Zero every score and forget drawn words
    ResetAll,
    /// Close the winner celebration
    DismissWinner,
    /// Add a team or player
    AddParticipant(String),
    /// Remove a team or player
    RemoveParticipant(Id),
    /// Rename a team or player
    RenameParticipant {
        /// Participant to rename
        id: Id,
        /// Requested name
        name: String,
    },
    /// Switch between teams and players
    SetMode(Mode),
    /// Change the winning threshold
    SetWinningScore(u64),
    /// Turn reference images on or off
    SetAiImages(bool),
    /// Add an empty category
    AddCategory(String),
    /// Rename a category
    RenameCategory {
        /// Category to rename
        id: Id,
        /// Requested name
        name: String,
    },
    /// Remove a category
    RemoveCategory(Id),
    /// Add a word to a category
    AddWord {
        /// Category to extend
        category: Id,
        /// Word to add
        word: String,
    },
    /// Remove a word from a category
    RemoveWord {
        /// Category to shrink
        category: Id,
        /// Word to remove
        word: String,
    },
    /// Replace every category with the built-in set
    ResetCategories,
}

/// Result type of game actions
pub type Outcome = Result<Vec<Effect>, Error>;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A complete game session
pub struct Game<R: RandomSource = fastrand::Rng> {
    categories: CategoryBook,
    used_words: UsedWords,
    ledger: Ledger,
    settings: Settings,
    round: Round,
    wheel: Wheel,
    spin_started: Option<Instant>,
    winner: Option<Winner>,
    rng: R,
}

impl<R: RandomSource> Debug for Game<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("categories", &self.categories.len())
            .field("participants", &self.ledger.participants().len())
            .field("settings", &self.settings)
            .field("phase", &self.round.phase())
            .field("spinning", &self.wheel.is_spinning())
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(random::entropy())
    }
}

impl Game {
    /// Restores a game from the store with an entropy-seeded generator
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        Self::load_with(store, random::entropy())
    }
}

impl<R: RandomSource> Game<R> {
    /// Creates a game with the built-in categories and no participants
    pub fn new(rng: R) -> Self {
        Self {
            categories: CategoryBook::defaults(),
            used_words: UsedWords::default(),
            ledger: Ledger::default(),
            settings: Settings::default(),
            round: Round::new(),
            wheel: Wheel::new(),
            spin_started: None,
            winner: None,
            rng,
        }
    }

    /// Restores persisted state, falling back to defaults for anything
    /// missing or malformed
    pub fn load_with<S: Store + ?Sized>(store: &S, rng: R) -> Self {
        let snapshot = storage::load(store);
        let mut game = Self::new(rng);
        game.categories = snapshot.categories;
        game.ledger = Ledger::from_participants(snapshot.participants);
        game.settings.mode = snapshot.mode;
        game.settings.ai_images = snapshot.ai_images;
        info!(
            categories = game.categories.len(),
            participants = game.ledger.participants().len(),
            "game restored"
        );
        game
    }

    /// Writes one piece of state to the store
    pub fn persist<S: Store + ?Sized>(&self, store: &mut S, key: Key) {
        match key {
            Key::Categories => storage::write(store, key, &self.categories),
            Key::Participants => storage::write(store, key, self.ledger.participants()),
            Key::Mode => storage::write(store, key, &self.settings.mode),
            Key::AiImages => storage::write(store, key, &self.settings.ai_images),
        }
    }

    /// The editable category set
    pub fn categories(&self) -> &CategoryBook {
        &self.categories
    }

    /// Words drawn in the current cycle of each category
    pub fn used_words(&self) -> &UsedWords {
        &self.used_words
    }

    /// Participants in creation order
    pub fn participants(&self) -> &[Participant] {
        self.ledger.participants()
    }

    /// Points scored since the last reset
    pub fn total_points(&self) -> u64 {
        self.ledger.total_points()
    }

    /// Host settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The round being played
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The category wheel
    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    /// The declared winner, until dismissed or reset
    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// Whether a spin request would be accepted
    pub fn can_spin(&self) -> bool {
        !self.wheel.is_spinning()
            && self.round.phase() == Phase::AwaitingSpin
            && self.categories.can_spin()
    }

    /// Suggests a free name for a new participant
    pub fn suggest_name(&self) -> Option<String> {
        names::suggest_unique(self.ledger.names(), self.settings.mode)
    }

    /// Handles an action, turning rejections into error notices
    pub fn receive_message(&mut self, message: IncomingMessage, now: Instant) -> Vec<Effect> {
        let outcome = match message {
            IncomingMessage::Spin => self.request_spin(now),
            IncomingMessage::ChooseTime(seconds) => self.choose_time(seconds),
            IncomingMessage::CloseRound => self.close_round(),
            IncomingMessage::Retry => self.retry(),
            IncomingMessage::AwardPoint(id) => self.award_point(id),
            IncomingMessage::ResetAll => Ok(self.reset_all()),
            IncomingMessage::DismissWinner => Ok(self.dismiss_winner()),
            IncomingMessage::AddParticipant(name) => self.add_participant(&name),
            IncomingMessage::RemoveParticipant(id) => self.remove_participant(id),
            IncomingMessage::RenameParticipant { id, name } => self.rename_participant(id, &name),
            IncomingMessage::SetMode(mode) => Ok(self.set_mode(mode)),
            IncomingMessage::SetWinningScore(score) => self.set_winning_score(score),
            IncomingMessage::SetAiImages(enabled) => Ok(self.set_ai_images(enabled)),
            IncomingMessage::AddCategory(name) => self.add_category(&name),
            IncomingMessage::RenameCategory { id, name } => self.rename_category(id, &name),
            IncomingMessage::RemoveCategory(id) => self.remove_category(id),
            IncomingMessage::AddWord { category, word } => self.add_word(category, &word),
            IncomingMessage::RemoveWord { category, word } => self.remove_word(category, &word),
            IncomingMessage::ResetCategories => self.reset_categories(),
        };

        outcome.unwrap_or_else(|error| {
            debug!(%error, "action rejected");
            vec![Notice::error(error.to_string()).into()]
        })
    }

    /// Starts a spin at `now`
    ///
    /// # Errors
    ///
    /// * `Error::Round` - A word is already in play
    /// * `Error::Wheel` - The wheel is spinning or no category has words
    pub fn request_spin(&mut self, now: Instant) -> Outcome {
        let phase = self.round.phase();
        if phase != Phase::AwaitingSpin {
            return Err(round::Error::InvalidTransition {
                phase,
                action: Action::Begin,
            }
            .into());
        }

        let spin = self.wheel.spin(&self.categories.displayed(), &mut self.rng)?;
        debug!(
            category = %spin.category(),
            segment = spin.segment(),
            target = spin.target(),
            "spin started"
        );
        self.spin_started = Some(now);
        Ok(Vec::new())
    }

    /// Moves the wheel animation to `now`
    ///
    /// Produces a tick cue per segment border crossed and, on the final
    /// frame, draws the word and opens the round.
    pub fn advance_spin(&mut self, now: Instant) -> Vec<Effect> {
        let Some(started) = self.spin_started else {
            return Vec::new();
        };
        let Some(frame) = self.wheel.advance(now.saturating_duration_since(started)) else {
            return Vec::new();
        };

        let mut effects: Vec<Effect> = (0..frame.ticks).map(|_| Cue::SegmentTick.into()).collect();

        if let Some(category) = frame.landed {
            self.spin_started = None;
            effects.extend(self.land(category));
        }

        effects
    }

    fn land(&mut self, category_id: Id) -> Vec<Effect> {
        let Some(category) = self.categories.get(category_id) else {
            warn!(category = %category_id, "wheel landed on a removed category");
            return vec![Notice::error("That category no longer exists, spin again.").into()];
        };

        let draw = word_pool::draw_word(category, &self.used_words, &mut self.rng);
        let selection = Selection {
            category: category.id,
            category_name: category.name.clone(),
            word: draw.word.clone(),
        };
        let category_name = category.name.clone();

        if let Err(error) = self.round.begin(selection) {
            warn!(%error, "could not open a round after the spin");
            return vec![Notice::error(error.to_string()).into()];
        }
        self.used_words = draw.used;

        info!(category = %category_name, cycled = draw.cycled, "word drawn");

        let mut effects: Vec<Effect> = vec![
            Cue::Landed.into(),
            Announcement(category_name.clone()).into(),
        ];
        if draw.cycled {
            effects.push(
                Notice::info(format!(
                    "Every word in {category_name} has been drawn, starting over."
                ))
                .into(),
            );
        }
        effects.push(
            DrawnWord {
                category: category_id,
                category_name,
                word: draw.word.clone(),
                cycled: draw.cycled,
            }
            .into(),
        );
        if self.settings.ai_images {
            effects.push(ImageRequest { word: draw.word }.into());
        }
        effects
    }

    /// Starts the round clock
    ///
    /// # Errors
    ///
    /// Returns `Error::Round` outside the time choice or for a length that
    /// is not offered.
    pub fn choose_time(&mut self, seconds: u64) -> Outcome {
        let token = self.round.choose_time(seconds)?;
        debug!(seconds, "round started");
        Ok(vec![Self::alarm(token)])
    }

    fn alarm(token: TimerToken) -> Effect {
        Alarm {
            token,
            after: TICK_INTERVAL,
        }
        .into()
    }

    /// Applies a countdown tick delivered by the caller
    ///
    /// Ticks from a replaced or stopped countdown do nothing.
    pub fn receive_alarm(&mut self, alarm: Alarm) -> Vec<Effect> {
        match self.round.tick(alarm.token) {
            Tick::Stale => Vec::new(),
            Tick::Running { warning, .. } => {
                let mut effects = Vec::with_capacity(2);
                if warning {
                    effects.push(Cue::CountdownWarning.into());
                }
                effects.push(Self::alarm(alarm.token));
                effects
            }
            Tick::Expired => {
                info!("round time is up");
                vec![Cue::TimeUp.into(), Notice::info("Time's up!").into()]
            }
        }
    }

    /// Discards the word and returns to the wheel
    ///
    /// # Errors
    ///
    /// Returns `Error::Round` when no word is in play.
    pub fn close_round(&mut self) -> Outcome {
        let closed = self.round.close()?;
        debug!(word = ?closed.map(|s| s.word), "round closed");
        Ok(Vec::new())
    }

    /// Replays the same word after the clock ran out
    ///
    /// # Errors
    ///
    /// Returns `Error::Round` unless the round has finished.
    pub fn retry(&mut self) -> Outcome {
        self.round.retry()?;
        Ok(Vec::new())
    }

    /// Gives one point to a participant and evaluates the game
    ///
    /// # Errors
    ///
    /// * `Error::WinnerDeclared` - A winner is still being celebrated
    /// * `Error::Ledger` - The participant does not exist
    pub fn award_point(&mut self, id: Id) -> Outcome {
        if self.winner.is_some() {
            return Err(Error::WinnerDeclared);
        }

        let outcome = self.ledger.award_point(id, self.settings.winning_score)?;
        debug!(
            participant = %id,
            score = outcome.score,
            total = outcome.total_points,
            "point awarded"
        );

        let mut effects: Vec<Effect> = vec![Cue::Point.into(), Key::Participants.into()];

        if let Some(winner) = outcome.verdict.winner {
            info!(winner = %winner.name, score = winner.score, "game won");
            self.winner = Some(winner.clone());
            effects.push(Cue::Victory.into());
            effects.push(winner.into());
        } else if let Some(milestone) = outcome.verdict.milestone {
            effects.push(Announcement(milestone.to_string()).into());
        }

        Ok(effects)
    }

    /// Zeroes every score, forgets drawn words and clears the winner
    pub fn reset_all(&mut self) -> Vec<Effect> {
        self.ledger.reset_scores();
        self.used_words.clear();
        self.winner = None;
        info!("scores reset");
        vec![
            Key::Participants.into(),
            Notice::success("Scores have been reset.").into(),
        ]
    }

    /// Ends the winner celebration; scores are kept
    pub fn dismiss_winner(&mut self) -> Vec<Effect> {
        self.winner = None;
        Vec::new()
    }

    /// Adds a team or player
    ///
    /// # Errors
    ///
    /// Returns `Error::Ledger` for a rejected name.
    pub fn add_participant(&mut self, name: &str) -> Outcome {
        let participant = self.ledger.add(name)?;
        info!(participant = %participant.id, name = %participant.name, "participant added");
        Ok(vec![Key::Participants.into()])
    }

    /// Removes a team or player
    ///
    /// # Errors
    ///
    /// Returns `Error::Ledger` when the participant does not exist.
    pub fn remove_participant(&mut self, id: Id) -> Outcome {
        let removed = self.ledger.remove(id)?;
        if self.winner.as_ref().is_some_and(|w| w.id == id) {
            self.winner = None;
        }
        info!(participant = %id, name = %removed.name, "participant removed");
        Ok(vec![Key::Participants.into()])
    }

    /// Renames a team or player
    ///
    /// # Errors
    ///
    /// Returns `Error::Ledger` for an unknown participant or rejected name.
    pub fn rename_participant(&mut self, id: Id, name: &str) -> Outcome {
        let name = self.ledger.rename(id, name)?;
        if let Some(winner) = self.winner.as_mut().filter(|w| w.id == id) {
            winner.name = name;
        }
        Ok(vec![Key::Participants.into()])
    }

    /// Switches between teams and players
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Effect> {
        self.settings.mode = mode;
        vec![Key::Mode.into()]
    }

    /// Changes the winning threshold; 0 disables automatic wins
    ///
    /// # Errors
    ///
    /// Returns `Error::Settings` for a threshold that is not offered.
    pub fn set_winning_score(&mut self, winning_score: u64) -> Outcome {
        let settings = Settings {
            winning_score,
            ..self.settings
        };
        settings
            .validate()
            .map_err(|report| Error::Settings(report.to_string()))?;
        self.settings = settings;
        Ok(Vec::new())
    }

    /// Turns reference images on or off
    pub fn set_ai_images(&mut self, enabled: bool) -> Vec<Effect> {
        self.settings.ai_images = enabled;
        vec![Key::AiImages.into()]
    }

    fn ensure_wheel_idle(&self) -> Result<(), Error> {
        if self.wheel.is_spinning() {
            Err(wheel::Error::AlreadySpinning.into())
        } else {
            Ok(())
        }
    }

    /// Adds an empty category
    ///
    /// # Errors
    ///
    /// `Error::Wheel` while spinning, or `Error::Category` for a rejected name.
    pub fn add_category(&mut self, name: &str) -> Outcome {
        self.ensure_wheel_idle()?;
        let id = self.categories.add_category(name)?;
        debug!(category = %id, "category added");
        Ok(vec![Key::Categories.into()])
    }

    /// Renames a category
    ///
    /// # Errors
    ///
    /// `Error::Wheel` while spinning, or `Error::Category` for an unknown
    /// category or rejected name.
    pub fn rename_category(&mut self, id: Id, name: &str) -> Outcome {
        self.ensure_wheel_idle()?;
        self.categories.rename_category(id, name)?;
        Ok(vec![Key::Categories.into()])
    }

    /// Removes a category and its drawn-word history
    ///
    /// # Errors
    ///
    /// `Error::Wheel` while spinning, or `Error::Category` for an unknown
    /// category.
    pub fn remove_category(&mut self, id: Id) -> Outcome {
        self.ensure_wheel_idle()?;
        let removed = self.categories.remove_category(id)?;
        self.used_words.forget_category(id);
        debug!(category = %id, name = %removed.name, "category removed");
        Ok(vec![Key::Categories.into()])
    }

    /// Adds a word to a category
    ///
    /// # Errors
    ///
    /// `Error::Wheel` while spinning, or `Error::Category` for an unknown
    /// category or rejected word.
    pub fn add_word(&mut self, category: Id, word: &str) -> Outcome {
        self.ensure_wheel_idle()?;
        self.categories.add_word(category, word)?;
        Ok(vec![Key::Categories.into()])
    }

    /// Removes a word from a category and from its drawn-word history
    ///
    /// # Errors
    ///
    /// `Error::Wheel` while spinning, or `Error::Category` for an unknown
    /// category or word.
    pub fn remove_word(&mut self, category: Id, word: &str) -> Outcome {
        self.ensure_wheel_idle()?;
        let removed = self.categories.remove_word(category, word)?;
        self.used_words.forget_word(category, &removed);
        Ok(vec![Key::Categories.into()])
    }

    /// Replaces every category with the built-in set
    ///
    /// # Errors
    ///
    /// Returns `Error::Wheel` while spinning.
    pub fn reset_categories(&mut self) -> Outcome {
        self.ensure_wheel_idle()?;
        self.categories.reset_to_defaults();
        self.used_words.clear();
        info!("categories reset to defaults");
        Ok(vec![
            Key::Categories.into(),
            Notice::success("Categories restored.").into(),
        ])
    }
}
