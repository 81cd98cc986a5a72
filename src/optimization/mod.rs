mod ada_grad;
mod adam;
mod gradient_descent;
mod optimizer;

pub use ada_grad::{AdaGrad, SUM_SEED, ada_grad};
pub use adam::{Adam, BETA1, BETA2, DECAY, MOMENT_SEED, adam};
pub use gradient_descent::{GradientDescent, sgd};
pub use optimizer::Optimizer;
