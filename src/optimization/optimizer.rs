use crate::error::Result;

/// Defines the strategy for updating parameters based on a gradient.
pub trait Optimizer {
    /// Updates the provided slice of parameters using the gradient.
    ///
    /// # Arguments
    /// * `grad` - A reference to the gradient.
    /// * `params` - The parameters to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad`, `params` or the optimizer's own
    /// state, in which case nothing is updated.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()>;
}
