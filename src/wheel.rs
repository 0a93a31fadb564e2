//! Category wheel selection and spin animation
//!
//! The wheel is split into equal segments, one per displayed category,
//! segment `i` covering `[i * span, (i + 1) * span)` degrees in wheel
//! coordinates. A fixed pointer sits at angle zero; turning the wheel
//! clockwise by `rotation` degrees brings wheel angle `-rotation` under it.
//!
//! A spin picks the winning category up front, then animates towards a
//! rotation that puts the pointer inside that category's segment. The
//! animation is sampled by the caller on every display refresh.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::{
    category::Category,
    constants::wheel::{FULL_TURN, LANDING_MARGIN, SPIN_DURATION_MS, SPIN_LOOPS},
    id::Id,
    random::RandomSource,
};

/// Reasons a spin request is refused
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A spin is already in flight
    #[error("the wheel is already spinning")]
    AlreadySpinning,
    /// No category has any words
    #[error("no category has words to draw")]
    NothingToSpin,
}

/// Angular width of one segment, in degrees
pub fn segment_span(segments: usize) -> f64 {
    FULL_TURN / segments.max(1) as f64
}

/// Wheel angle currently under the pointer, in `[0, 360)`
pub fn pointer_angle(rotation: f64) -> f64 {
    (-rotation).rem_euclid(FULL_TURN)
}

/// Index of the segment under the pointer
pub fn segment_at(rotation: f64, segments: usize) -> usize {
    let index = (pointer_angle(rotation) / segment_span(segments)).floor() as usize;
    index.min(segments.saturating_sub(1))
}

/// Computes the final rotation of a spin
///
/// The result is at least [`SPIN_LOOPS`] full turns past `current` and
/// leaves the pointer inside segment `index`. `jitter` in `[0, 1)` moves the
/// landing point across the segment, keeping clear of both borders.
pub fn target_rotation(current: f64, index: usize, segments: usize, jitter: f64) -> f64 {
    let span = segment_span(segments);
    let offset = LANDING_MARGIN + jitter.clamp(0.0, 1.0) * (1.0 - 2.0 * LANDING_MARGIN);
    let landing_angle = (index as f64 + offset) * span;
    let resting = (FULL_TURN - landing_angle).rem_euclid(FULL_TURN);
    let delta = (resting - current.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    current + f64::from(SPIN_LOOPS) * FULL_TURN + delta
}

/// Ease-out cubic curve, fast start and gentle stop
pub fn ease_out(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One sample of a running spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Rotation to draw, in degrees
    pub rotation: f64,
    /// Segment borders the pointer passed since the previous sample
    pub ticks: u32,
    /// Set on the final sample only, with the chosen category
    pub landed: Option<Id>,
}

/// A spin in progress towards a chosen category
#[derive(Debug, Clone, PartialEq)]
pub struct SpinAnimation {
    category: Id,
    segment: usize,
    segments: usize,
    start: f64,
    target: f64,
    duration: Duration,
    last_rotation: f64,
    finished: bool,
}

impl SpinAnimation {
    /// The category the spin will land on
    pub fn category(&self) -> Id {
        self.category
    }

    /// The displayed segment the spin will land on
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Rotation the wheel settles at
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Total animation length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the final sample was already produced
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Samples the animation `elapsed` after it started
    ///
    /// Returns `None` once the landing frame has been produced.
    pub fn sample(&mut self, elapsed: Duration) -> Option<Frame> {
        if self.finished {
            return None;
        }

        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let done = progress >= 1.0;
        let rotation = if done {
            self.target
        } else {
            self.start + (self.target - self.start) * ease_out(progress)
        };

        let span = segment_span(self.segments);
        let before = (self.last_rotation / span).floor();
        let after = (rotation / span).floor();
        let ticks = (after - before).max(0.0) as u32;

        self.last_rotation = rotation.max(self.last_rotation);
        self.finished = done;

        Some(Frame {
            rotation,
            ticks,
            landed: done.then_some(self.category),
        })
    }
}

/// The category wheel and its resting position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wheel {
    rotation: f64,
    spin: Option<SpinAnimation>,
}

impl Wheel {
    /// Creates a wheel at rest at rotation zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rotation, in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Whether a spin is in flight
    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// The spin in flight, if any
    pub fn current_spin(&self) -> Option<&SpinAnimation> {
        self.spin.as_ref()
    }

    /// Starts a spin over the categories shown on the wheel
    ///
    /// `displayed` is the wheel in segment order, as returned by
    /// [`CategoryBook::displayed`](crate::category::CategoryBook::displayed).
    /// The winner is drawn uniformly among displayed categories with at
    /// least one word, regardless of how many words each has.
    ///
    /// # Errors
    ///
    /// * `Error::AlreadySpinning` - A spin is in flight; requests are not queued
    /// * `Error::NothingToSpin` - No category has words; nothing is animated
    pub fn spin<R: RandomSource>(
        &mut self,
        displayed: &[&Category],
        rng: &mut R,
    ) -> Result<&SpinAnimation, Error> {
        if self.spin.is_some() {
            return Err(Error::AlreadySpinning);
        }

        let selectable: Vec<usize> = displayed
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_selectable())
            .map(|(i, _)| i)
            .collect();
        let segment = *rng.choose(&selectable).ok_or(Error::NothingToSpin)?;
        let chosen = displayed[segment];

        let target = target_rotation(self.rotation, segment, displayed.len(), rng.unit());

        Ok(self.spin.insert(SpinAnimation {
            category: chosen.id,
            segment,
            segments: displayed.len(),
            start: self.rotation,
            target,
            duration: Duration::from_millis(SPIN_DURATION_MS),
            last_rotation: self.rotation,
            finished: false,
        }))
    }

    /// Advances the spin in flight to `elapsed` since it started
    ///
    /// The frame carrying `landed` is produced exactly once; the wheel then
    /// rests at the target rotation and accepts a new spin.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Frame> {
        let frame = self.spin.as_mut()?.sample(elapsed)?;
        self.rotation = frame.rotation;
        if frame.landed.is_some() {
            self.spin = None;
        }
        Some(frame)
    }
}
