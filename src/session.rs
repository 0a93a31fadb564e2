//! Output ports and the effect runner
//!
//! This module defines the traits the game uses to reach the outside
//! world (speakers, speech synthesis, on-screen notices) and
//! [`EffectRunner`], which carries out the effects returned by
//! [`Game`](crate::game::Game) actions through them.

use tracing::debug;

use crate::{Cue, Effect, Notice, game::Game, random::RandomSource, storage::Store};

/// Trait for playing short sounds
///
/// Playback is fire-and-forget and never fails visibly.
pub trait AudioCue {
    /// Plays the sound for `cue`
    fn play(&mut self, cue: Cue);
}

/// Trait for reading text aloud
pub trait Speech {
    /// Whether the platform can speak at all
    fn is_supported(&self) -> bool;

    /// Speaks `text` without waiting for it to finish
    ///
    /// # Arguments
    ///
    /// * `text` - The words to speak
    fn speak(&mut self, text: &str);
}

/// Trait for showing transient messages
pub trait Notifier {
    /// Shows a notice
    fn notify(&mut self, notice: &Notice);
}

/// Carries out effects through the output ports
///
/// Sound, speech, notices and persistence are handled here; effects that
/// only the user interface can act on (drawn words, image requests, winner
/// celebrations and tick scheduling) are handed back to the caller.
#[derive(Debug)]
pub struct EffectRunner<A, S, N> {
    audio: A,
    speech: S,
    notifier: N,
}

impl<A: AudioCue, S: Speech, N: Notifier> EffectRunner<A, S, N> {
    /// Creates a runner over the given ports
    pub fn new(audio: A, speech: S, notifier: N) -> Self {
        Self {
            audio,
            speech,
            notifier,
        }
    }

    /// Gives the ports back
    pub fn into_parts(self) -> (A, S, N) {
        (self.audio, self.speech, self.notifier)
    }

    /// Runs `effects` in order
    ///
    /// # Arguments
    ///
    /// * `effects` - Effects returned by a game action
    /// * `game` - The game, read when state has to be persisted
    /// * `store` - Where persisted state is written
    ///
    /// # Returns
    ///
    /// The effects left for the user interface, in their original order
    pub fn run<R: RandomSource, St: Store + ?Sized>(
        &mut self,
        effects: Vec<Effect>,
        game: &Game<R>,
        store: &mut St,
    ) -> Vec<Effect> {
        let mut remaining = Vec::new();
        for effect in effects {
            match effect {
                Effect::Cue(cue) => self.audio.play(cue),
                Effect::Announcement(announcement) => {
                    if self.speech.is_supported() {
                        self.speech.speak(&announcement.0);
                    } else {
                        debug!("speech unsupported, showing announcement instead");
                        self.notifier.notify(&Notice::info(announcement.0));
                    }
                }
                Effect::Notice(notice) => self.notifier.notify(&notice),
                Effect::Persist(key) => game.persist(store, key),
                effect @ (Effect::Drawn(_)
                | Effect::Images(_)
                | Effect::Winner(_)
                | Effect::Alarm(_)) => remaining.push(effect),
            }
        }
        remaining
    }
}
