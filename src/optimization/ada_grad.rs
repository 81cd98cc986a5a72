use super::Optimizer;
use crate::error::{Result, check_len};

/// Initial value of every sum of squares slot, keeps the first square root away from zero.
pub const SUM_SEED: f32 = 1e-10;

/// AdaGrad step, for every index accumulates `sum[i] += g[i]^2` and then applies
/// `x[i] += eta / sqrt(sum[i]) * g[i]`.
///
/// `sum` must be seeded with strictly positive values, see [`SUM_SEED`].
///
/// # Arguments
/// * `eta` - The learning rate.
/// * `grad` - The gradient.
/// * `sum` - The running sum of squared gradients.
/// * `params` - The parameters to update.
///
/// # Returns
/// An error if the three slices differ in length.
pub fn ada_grad(eta: f32, grad: &[f32], sum: &mut [f32], params: &mut [f32]) -> Result<()> {
    check_len(params.len(), grad.len())?;
    check_len(params.len(), sum.len())?;

    params
        .iter_mut()
        .zip(grad)
        .zip(sum.iter_mut())
        .for_each(|((p, g), s)| {
            *s += g * g;
            *p += eta / s.sqrt() * g;
        });

    Ok(())
}

#[derive(Debug)]
pub struct AdaGrad {
    learning_rate: f32,
    sum: Box<[f32]>,
}

impl AdaGrad {
    /// Creates a new `AdaGrad` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `AdaGrad` instance with its sum of squares seeded.
    pub fn new(len: usize, learning_rate: f32) -> Self {
        Self {
            learning_rate,
            sum: vec![SUM_SEED; len].into_boxed_slice(),
        }
    }

    /// The running sum of squared gradients.
    pub fn sum(&self) -> &[f32] {
        &self.sum
    }
}

impl Optimizer for AdaGrad {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        ada_grad(self.learning_rate, grad, &mut self.sum, params)
    }
}
