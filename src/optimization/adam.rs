use super::Optimizer;
use crate::error::{Result, check_len};

/// First moment decay rate, in complement form: `m1` keeps `1 - BETA1` of its previous value.
pub const BETA1: f32 = 0.1;
/// Second moment decay rate, in complement form: `m2` keeps `1 - BETA2` of its previous value.
pub const BETA2: f32 = 0.001;
/// Numerical floor, also the per call multiplier applied to `lambda_t`.
pub const DECAY: f32 = 1e-8;
/// Initial value of every moment slot, keeps `sqrt(m2)` away from zero.
pub const MOMENT_SEED: f32 = 1e-10;

/// Adam step with a decaying first moment rate.
///
/// The first moment rate is `b1 = 1 - (1 - BETA1) * lambda_t`, so it starts at `BETA1` and moves
/// towards 1 as `lambda_t` decays. The bias corrections are `k1 = 1 / (1 - beta1_t)` and
/// `k2 = sqrt(1 / (1 - beta2_t))`, evaluated with the trackers already advanced for this step.
/// Evaluating them before advancing, with the trackers still at their initial 1, divides by zero
/// on the first call: `k1` and `k2` are both infinite, `eta * k1 / k2` is NaN and every parameter
/// turns NaN. The trackers hold the same values after each call either way.
///
/// Three passes are made over the slices, each feeding the next:
/// 1. `m1[i] = b1 * g[i] + (1 - b1) * m1[i]`
/// 2. `m2[i] = BETA2 * g[i]^2 + (1 - BETA2) * m2[i]`
/// 3. `x[i] -= eta * k1 / k2 * m1[i] / sqrt(m2[i])`
///
/// On every call `lambda_t` is multiplied by [`DECAY`] (not by `1 - DECAY`), so after the first
/// call `b1` is 1 up to rounding and `m1` simply tracks the gradient. This is kept as is.
///
/// # Arguments
/// * `eta` - The learning rate.
/// * `lambda_t`, `beta1_t`, `beta2_t` - Decay trackers, start at 1 and are updated in place.
/// * `grad` - The gradient.
/// * `m1`, `m2` - First and second moment estimates, `m2` must be strictly positive.
/// * `params` - The parameters to update.
///
/// # Returns
/// An error if the slices differ in length, in which case neither the slices nor the trackers
/// are touched.
#[allow(clippy::too_many_arguments)]
pub fn adam(
    eta: f32,
    lambda_t: &mut f32,
    beta1_t: &mut f32,
    beta2_t: &mut f32,
    grad: &[f32],
    m1: &mut [f32],
    m2: &mut [f32],
    params: &mut [f32],
) -> Result<()> {
    check_len(params.len(), grad.len())?;
    check_len(params.len(), m1.len())?;
    check_len(params.len(), m2.len())?;

    let b1 = 1. - (1. - BETA1) * *lambda_t;
    let b2 = 1. - BETA2;

    *lambda_t *= DECAY;
    *beta1_t *= 1. - BETA1;
    *beta2_t *= b2;

    let k1 = 1. / (1. - *beta1_t);
    let k2_sqrt = (1. / (1. - *beta2_t)).sqrt();
    let eta_k1_k2 = eta * k1 / k2_sqrt;

    for (m, g) in m1.iter_mut().zip(grad) {
        *m = b1 * g + (1. - b1) * *m;
    }

    for (v, g) in m2.iter_mut().zip(grad) {
        *v = BETA2 * g * g + b2 * *v;
    }

    params
        .iter_mut()
        .zip(m1.iter())
        .zip(m2.iter())
        .for_each(|((p, m), v)| *p -= eta_k1_k2 * m / v.sqrt());

    Ok(())
}

#[derive(Debug)]
pub struct Adam {
    learning_rate: f32,
    lambda_t: f32,
    beta1_t: f32,
    beta2_t: f32,
    m1: Box<[f32]>,
    m2: Box<[f32]>,
}

impl Adam {
    /// Creates a new `Adam` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `Adam` instance with seeded moments and all trackers at 1.
    pub fn new(len: usize, learning_rate: f32) -> Self {
        Self {
            learning_rate,
            lambda_t: 1.,
            beta1_t: 1.,
            beta2_t: 1.,
            m1: vec![MOMENT_SEED; len].into_boxed_slice(),
            m2: vec![MOMENT_SEED; len].into_boxed_slice(),
        }
    }

    pub fn lambda_t(&self) -> f32 {
        self.lambda_t
    }

    pub fn beta1_t(&self) -> f32 {
        self.beta1_t
    }

    pub fn beta2_t(&self) -> f32 {
        self.beta2_t
    }

    pub fn m1(&self) -> &[f32] {
        &self.m1
    }

    pub fn m2(&self) -> &[f32] {
        &self.m2
    }
}

impl Optimizer for Adam {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        adam(
            self.learning_rate,
            &mut self.lambda_t,
            &mut self.beta1_t,
            &mut self.beta2_t,
            grad,
            &mut self.m1,
            &mut self.m2,
            params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchErr;

    #[test]
    fn trackers_strictly_decrease() {
        let grad = [0.5, -1., 2.];
        let mut params = [0.; 3];

        let mut optimizer = Adam::new(3, 0.1);
        let (mut beta1_t, mut beta2_t) = (optimizer.beta1_t(), optimizer.beta2_t());

        for _ in 0..100 {
            optimizer.update_params(&grad, &mut params).unwrap();

            assert!(optimizer.beta1_t() < beta1_t);
            assert!(optimizer.beta2_t() < beta2_t);
            assert!(optimizer.beta1_t() > 0.);

            beta1_t = optimizer.beta1_t();
            beta2_t = optimizer.beta2_t();
        }
    }

    #[test]
    fn lambda_collapses_after_the_first_call() {
        let grad = [1.];
        let mut params = [0.];

        let mut optimizer = Adam::new(1, 0.1);
        optimizer.update_params(&grad, &mut params).unwrap();

        assert_eq!(optimizer.lambda_t(), DECAY);
    }

    #[test]
    fn first_call_is_finite() {
        let grad = [3., -2., 1e3];
        let mut params = [0.; 3];

        let mut optimizer = Adam::new(3, 0.1);
        optimizer.update_params(&grad, &mut params).unwrap();

        assert!(params.iter().all(|p| p.is_finite()));
        assert!(params[0] < 0.);
        assert!(params[1] > 0.);
    }

    #[test]
    fn zero_first_moment_keeps_params() {
        let grad = [0.; 4];
        let mut m1 = [0.; 4];
        let mut m2 = [MOMENT_SEED; 4];
        let mut params = [1., 2., 3., 4.];
        let (mut lambda_t, mut beta1_t, mut beta2_t) = (1., 1., 1.);

        for _ in 0..10 {
            adam(
                0.1,
                &mut lambda_t,
                &mut beta1_t,
                &mut beta2_t,
                &grad,
                &mut m1,
                &mut m2,
                &mut params,
            )
            .unwrap();
        }

        assert_eq!(params, [1., 2., 3., 4.]);
        assert_eq!(m1, [0.; 4]);
    }

    #[test]
    fn zero_gradient_decays_moments() {
        let grad = [0.; 2];
        let mut params = [0.; 2];

        let mut optimizer = Adam::new(2, 0.1);

        for _ in 0..10 {
            let m1 = optimizer.m1().to_vec();
            let m2 = optimizer.m2().to_vec();

            optimizer.update_params(&grad, &mut params).unwrap();

            for (now, before) in optimizer.m1().iter().zip(&m1) {
                assert!(*now >= 0. && now <= before);
            }

            for (now, before) in optimizer.m2().iter().zip(&m2) {
                assert!(now < before);
                assert!((now / before - (1. - BETA2)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn mismatch_leaves_everything_untouched() {
        let grad = [1., 2., 3.];
        let mut m1 = [MOMENT_SEED; 3];
        let mut m2 = [MOMENT_SEED; 2];
        let mut params = [0.; 3];
        let (mut lambda_t, mut beta1_t, mut beta2_t) = (1., 1., 1.);

        let err = adam(
            0.1,
            &mut lambda_t,
            &mut beta1_t,
            &mut beta2_t,
            &grad,
            &mut m1,
            &mut m2,
            &mut params,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BenchErr::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
        assert_eq!((lambda_t, beta1_t, beta2_t), (1., 1., 1.));
        assert_eq!(m1, [MOMENT_SEED; 3]);
        assert_eq!(params, [0.; 3]);
    }
}
