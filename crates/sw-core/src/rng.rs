//! Deterministic simulation-level RNG.
//!
//! The engine itself is deterministic and never draws random numbers; `SimRng`
//! exists for hosts, demos and tests that need reproducible agent layouts.
//! The same seed always produces the same sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Point;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG wrapper.
///
/// Used only in single-threaded contexts.  Derive independent streams with
/// [`child`](SimRng::child).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A unit-interval value, handy for intent fields.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.0.gen_range(0.0..=1.0)
    }

    /// Uniform point in the rectangle `[0, width) × [0, height)`.
    pub fn point_in(&mut self, width: f32, height: f32) -> Point {
        Point::new(
            self.0.gen_range(0.0..width),
            self.0.gen_range(0.0..height),
        )
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
