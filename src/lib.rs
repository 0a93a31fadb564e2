//! # Pictionary Roulette
//!
//! This library provides the core of a party drawing game: a wheel picks a
//! category, a word is drawn from it without repeats, teams or players
//! draw against a countdown, and the host awards points until someone
//! reaches the winning score.
//!
//! The game never touches the screen, speakers or storage directly. Every
//! operation returns a list of [`Effect`]s that an adapter (see
//! [`session::EffectRunner`]) turns into sound, speech, notices and writes
//! to the persistent store.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

pub mod constants;

pub mod category;
pub mod config;
mod defaults;
pub mod game;
pub mod generation;
pub mod id;
pub mod ledger;
mod names;
pub mod random;
pub mod round;
pub mod session;
pub mod storage;
pub mod timer;
pub mod wheel;
pub mod win;
pub mod word_pool;

/// Short sounds played by the audio port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// The pointer passed a segment border
    SegmentTick,
    /// The wheel stopped on a category
    Landed,
    /// One of the last seconds of a round
    CountdownWarning,
    /// The round clock reached zero
    TimeUp,
    /// A point was awarded
    Point,
    /// Someone won the game
    Victory,
}

/// Text to be read aloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub struct Announcement(pub String);

/// How a notice should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Neutral information
    Info,
    /// Something went well
    Success,
    /// A request was rejected
    Error,
}

/// A short-lived message shown to the players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Styling
    pub level: Level,
    /// Message
    pub text: String,
}

impl Notice {
    /// An informational notice
    pub fn info<S: Into<String>>(text: S) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    /// A success notice
    pub fn success<S: Into<String>>(text: S) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    /// A notice for a rejected request
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// A word the wheel produced, to be shown to the drawer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnWord {
    /// Category the wheel landed on
    pub category: id::Id,
    /// Name of that category
    pub category_name: String,
    /// Word to draw
    pub word: String,
    /// Whether the category ran out of words and started over
    pub cycled: bool,
}

/// Ask the caller to fetch reference drawings for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Word to illustrate
    pub word: String,
}

/// Ask the caller to deliver a countdown tick after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    /// Countdown run the tick belongs to
    pub token: timer::TimerToken,
    /// Delay before delivery
    pub after: web_time::Duration,
}

/// Side effects requested by a game operation
///
/// Effects are returned in the order they should be carried out.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From)]
pub enum Effect {
    /// Play a sound
    Cue(Cue),
    /// Read text aloud
    Announcement(Announcement),
    /// Show a transient message
    Notice(Notice),
    /// Write one piece of state to the store
    Persist(storage::Key),
    /// Show the drawn word
    Drawn(DrawnWord),
    /// Fetch reference images
    Images(ImageRequest),
    /// Celebrate the winner
    Winner(win::Winner),
    /// Schedule the next countdown tick
    Alarm(Alarm),
}

impl Effect {
    /// Converts the effect to a JSON string for a UI bridge
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
