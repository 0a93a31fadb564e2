//! Round countdown
//!
//! The countdown is driven by one-second ticks from the host environment.
//! Every start hands out a fresh [`TimerToken`]; ticks carrying an older
//! token are ignored, which is how a stopped or restarted countdown keeps
//! stale callbacks from playing sounds or counting down further.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

use crate::constants::timer::{CHOICES, WARNING_SECONDS};

/// Identifies one run of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// What a tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The tick belongs to a previous run and was ignored
    Stale,
    /// One second elapsed
    Running {
        /// Time left
        remaining: Duration,
        /// Whether the warning cue should play
        warning: bool,
    },
    /// The countdown reached zero
    Expired,
}

/// Whether `seconds` is one of the offered round durations
pub fn is_valid_choice(seconds: u64) -> bool {
    CHOICES.contains(&seconds)
}

/// Countdown for a single round
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    #[serde_as(as = "DurationSeconds<u64>")]
    remaining: Duration,
    generation: u64,
    running: bool,
}

impl Countdown {
    /// Creates a stopped countdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run, invalidating any previous token
    pub fn start(&mut self, duration: Duration) -> TimerToken {
        self.generation += 1;
        self.remaining = duration;
        self.running = true;
        TimerToken(self.generation)
    }

    /// Stops the countdown; outstanding tokens become stale
    pub fn stop(&mut self) {
        self.generation += 1;
        self.running = false;
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time left in the current run
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Token of the current run, if one is in progress
    pub fn token(&self) -> Option<TimerToken> {
        self.running.then_some(TimerToken(self.generation))
    }

    /// Applies one second of elapsed time
    pub fn tick(&mut self, token: TimerToken) -> Tick {
        if !self.running || token.0 != self.generation {
            return Tick::Stale;
        }

        self.remaining = self.remaining.saturating_sub(Duration::from_secs(1));
        if self.remaining.is_zero() {
            self.running = false;
            return Tick::Expired;
        }

        Tick::Running {
            remaining: self.remaining,
            warning: self.remaining.as_secs() <= WARNING_SECONDS,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_expiry() {
        let mut countdown = Countdown::new();
        let token = countdown.start(Duration::from_secs(3));

        assert_eq!(
            countdown.tick(token),
            Tick::Running {
                remaining: Duration::from_secs(2),
                warning: true
            }
        );
        assert!(matches!(countdown.tick(token), Tick::Running { .. }));
        assert_eq!(countdown.tick(token), Tick::Expired);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(token), Tick::Stale);
    }

    #[test]
    fn test_warning_only_in_final_seconds() {
        let mut countdown = Countdown::new();
        let token = countdown.start(Duration::from_secs(30));

        let warnings: Vec<bool> = (0..29)
            .map(|_| match countdown.tick(token) {
                Tick::Running { warning, .. } => warning,
                other => panic!("unexpected {other:?}"),
            })
            .collect();

        assert_eq!(warnings.iter().filter(|w| **w).count(), 5);
        assert!(!warnings[0]);
        assert!(warnings[28]);
    }

    #[test]
    fn test_restart_invalidates_old_token() {
        let mut countdown = Countdown::new();
        let old = countdown.start(Duration::from_secs(60));
        let new = countdown.start(Duration::from_secs(30));

        assert_eq!(countdown.tick(old), Tick::Stale);
        assert_eq!(countdown.remaining(), Duration::from_secs(30));
        assert!(matches!(countdown.tick(new), Tick::Running { .. }));
        assert_eq!(countdown.token(), Some(new));
    }

    #[test]
    fn test_stop_silences_pending_ticks() {
        let mut countdown = Countdown::new();
        let token = countdown.start(Duration::from_secs(60));
        countdown.stop();

        assert_eq!(countdown.tick(token), Tick::Stale);
        assert_eq!(countdown.remaining(), Duration::from_secs(60));
        assert_eq!(countdown.token(), None);
    }

    #[test]
    fn test_valid_choices() {
        assert!(is_valid_choice(60));
        assert!(!is_valid_choice(0));
        assert!(!is_valid_choice(45));
    }
}
