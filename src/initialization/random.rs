use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::Result;

/// Upper bound of the classic `rand()` range the gradient values are drawn from.
pub const RAND_MAX: f32 = 2147483647.;

/// A gradient generator that follows a certain probabilistic distribution.
///
/// The generator owns its random number generator, so seeding it is the only way to make the
/// sampled gradient reproducible.
pub struct RandGradGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f32>> RandGradGen<R, D> {
    /// Creates a new `RandGradGen` gradient generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }

    /// Samples exactly `n` values.
    ///
    /// # Arguments
    /// * `n` - The amount of values to generate.
    ///
    /// # Returns
    /// The sampled gradient.
    pub fn sample(&mut self, n: usize) -> Box<[f32]> {
        (0..n)
            .map(|_| self.distribution.sample(&mut self.rng))
            .collect()
    }
}

impl<R: Rng> RandGradGen<R, Uniform<f32>> {
    /// Creates a new `RandGradGen` gradient generator with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high).
    pub fn uniform_inclusive(rng: R, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new_inclusive(low, high)?))
    }

    /// Creates a new `RandGradGen` gradient generator over `[0, RAND_MAX]`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    pub fn rand_max(rng: R) -> Result<Self> {
        Self::uniform_inclusive(rng, 0., RAND_MAX)
    }
}
