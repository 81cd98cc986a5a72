use super::Optimizer;
use crate::error::{Result, check_len};

/// Plain gradient step, `x[i] += eta * g[i]` for every index.
///
/// # Arguments
/// * `eta` - The learning rate.
/// * `grad` - The gradient.
/// * `params` - The parameters to update.
///
/// # Returns
/// An error if `grad` and `params` differ in length.
pub fn sgd(eta: f32, grad: &[f32], params: &mut [f32]) -> Result<()> {
    check_len(params.len(), grad.len())?;

    for (p, g) in params.iter_mut().zip(grad) {
        *p += eta * g;
    }

    Ok(())
}

#[derive(Debug)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Creates a new `GradientDescent` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        sgd(self.learning_rate, grad, params)
    }
}
