//! Injectable source of randomness
//!
//! Every random decision in the game (category pick, word pick, landing
//! jitter) goes through [`RandomSource`] so tests can run the exact same
//! sequence twice with a seeded generator or a scripted one.

/// Uniform random choices used by the game core
pub trait RandomSource {
    /// Returns a uniformly chosen index in `0..len`
    ///
    /// Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;

    /// Returns a uniformly chosen fraction in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Picks one element of a non-empty slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            items.get(self.index(items.len()))
        }
    }
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn unit(&mut self) -> f64 {
        self.f64()
    }
}

/// Creates a generator seeded from the environment, for normal play
pub fn entropy() -> fastrand::Rng {
    fastrand::Rng::new()
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::RandomSource;

    /// Replays a fixed list of indices, wrapping each into range
    pub struct Scripted {
        indices: VecDeque<usize>,
        unit: f64,
    }

    impl Scripted {
        pub fn new(indices: &[usize]) -> Self {
            Self {
                indices: indices.iter().copied().collect(),
                unit: 0.5,
            }
        }

        pub fn with_unit(mut self, unit: f64) -> Self {
            self.unit = unit;
            self
        }
    }

    impl RandomSource for Scripted {
        fn index(&mut self, len: usize) -> usize {
            self.indices.pop_front().unwrap_or(0) % len
        }

        fn unit(&mut self) -> f64 {
            self.unit
        }
    }
}
