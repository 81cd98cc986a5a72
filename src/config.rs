use std::num::NonZeroUsize;

use crate::error::{BenchErr, Result};

pub const DEFAULT_DIMENSION: usize = 1000;
pub const DEFAULT_ITERATIONS: usize = 1_000_000;
pub const DEFAULT_LEARNING_RATE: f32 = 0.1;
pub const DEFAULT_SEED: u64 = 0;

/// Immutable bounds for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    dimension: NonZeroUsize,
    iterations: NonZeroUsize,
    learning_rate: f32,
    seed: u64,
}

impl BenchConfig {
    /// Creates a new benchmark configuration.
    ///
    /// # Args
    /// * `dimension` - Length of every vector handed to the kernels.
    /// * `iterations` - Number of kernel calls per segment.
    /// * `learning_rate` - Step size shared by every kernel.
    /// * `seed` - Seed of the gradient generator.
    ///
    /// # Returns
    /// An error if `dimension` or `iterations` is zero or `learning_rate` isn't finite.
    pub fn new(dimension: usize, iterations: usize, learning_rate: f32, seed: u64) -> Result<Self> {
        let dimension = NonZeroUsize::new(dimension)
            .ok_or_else(|| BenchErr::InvalidConfiguration("dimension must be non zero".into()))?;

        let iterations = NonZeroUsize::new(iterations)
            .ok_or_else(|| BenchErr::InvalidConfiguration("iterations must be non zero".into()))?;

        if !learning_rate.is_finite() {
            return Err(BenchErr::InvalidConfiguration(format!(
                "learning rate must be finite, got {learning_rate}"
            )));
        }

        Ok(Self {
            dimension,
            iterations,
            learning_rate,
            seed,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension.get()
    }

    pub fn iterations(&self) -> usize {
        self.iterations.get()
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dimension: NonZeroUsize::new(DEFAULT_DIMENSION).unwrap_or(NonZeroUsize::MIN),
            iterations: NonZeroUsize::new(DEFAULT_ITERATIONS).unwrap_or(NonZeroUsize::MIN),
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: DEFAULT_SEED,
        }
    }
}
