use std::{
    fmt::{self, Display},
    hint,
    io::Write,
    time::Duration,
};

use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::BenchConfig,
    error::Result,
    initialization::RandGradGen,
    optimization::{AdaGrad, Adam, GradientDescent, Optimizer},
    timer::{ScopedTimer, millis},
};

/// The update rules under benchmark, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Sgd,
    AdaGrad,
    Adam,
}

impl Kernel {
    pub const ALL: [Kernel; 3] = [Kernel::Sgd, Kernel::AdaGrad, Kernel::Adam];

    pub fn label(self) -> &'static str {
        match self {
            Kernel::Sgd => "SGD",
            Kernel::AdaGrad => "Ada-grad",
            Kernel::Adam => "Adam",
        }
    }
}

impl Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single kernel's segment.
#[derive(Debug, Clone)]
pub struct SegmentReport {
    pub kernel: Kernel,
    pub elapsed: Duration,
    /// First parameter after the last iteration, printed so the loop can't be optimized away.
    pub first: f32,
}

/// Calls `optimizer` `iterations` times, always with the same gradient.
///
/// # Arguments
/// * `optimizer` - The update rule, owning any accumulator state.
/// * `grad` - The gradient reused on every call.
/// * `params` - The parameters to update.
/// * `iterations` - Amount of calls, zero leaves everything untouched.
///
/// # Returns
/// The first error returned by the optimizer.
pub fn repeat<O: Optimizer>(
    optimizer: &mut O,
    grad: &[f32],
    params: &mut [f32],
    iterations: usize,
) -> Result<()> {
    for _ in 0..iterations {
        optimizer.update_params(hint::black_box(grad), params)?;
    }

    Ok(())
}

/// Times every kernel against a fixed gradient.
pub struct Benchmark {
    config: BenchConfig,
    grad: Box<[f32]>,
}

impl Benchmark {
    /// Creates a new `Benchmark`, sampling the gradient from a generator seeded with the
    /// configured seed.
    ///
    /// # Arguments
    /// * `config` - The benchmark bounds.
    ///
    /// # Returns
    /// A new `Benchmark` instance or an error if the gradient can't be sampled.
    pub fn new(config: BenchConfig) -> Result<Self> {
        let rng = StdRng::seed_from_u64(config.seed());
        let grad = RandGradGen::rand_max(rng)?.sample(config.dimension());

        Ok(Self { config, grad })
    }

    /// Creates a new `Benchmark` with a caller provided gradient.
    ///
    /// The gradient's length isn't checked here, a mismatch with the configured dimension makes
    /// every segment fail instead.
    pub fn with_gradient(config: BenchConfig, grad: impl Into<Box<[f32]>>) -> Self {
        Self {
            config,
            grad: grad.into(),
        }
    }

    pub fn gradient(&self) -> &[f32] {
        &self.grad
    }

    /// Runs every kernel in order writing the results to `out`.
    ///
    /// A failing segment is logged and doesn't stop the following ones.
    ///
    /// # Arguments
    /// * `out` - Where the report lines are written to.
    ///
    /// # Returns
    /// One result per kernel, in the order of `Kernel::ALL`.
    pub fn run<W: Write>(&self, out: &mut W) -> Vec<Result<SegmentReport>> {
        Kernel::ALL
            .into_iter()
            .map(|kernel| {
                let res = self.run_segment(kernel, out);
                if let Err(e) = &res {
                    error!(kernel = kernel.label(); "segment failed: {e}");
                }

                res
            })
            .collect()
    }

    /// Runs a single kernel's segment with freshly allocated state.
    ///
    /// Writes `"<kernel> start"`, then the elapsed time once the timed loop is left and finally
    /// the first parameter.
    pub fn run_segment<W: Write>(&self, kernel: Kernel, out: &mut W) -> Result<SegmentReport> {
        let len = self.config.dimension();
        let lr = self.config.learning_rate();

        match kernel {
            Kernel::Sgd => self.time(kernel, GradientDescent::new(lr), out),
            Kernel::AdaGrad => self.time(kernel, AdaGrad::new(len, lr), out),
            Kernel::Adam => self.time(kernel, Adam::new(len, lr), out),
        }
    }

    fn time<O, W>(&self, kernel: Kernel, mut optimizer: O, out: &mut W) -> Result<SegmentReport>
    where
        O: Optimizer,
        W: Write,
    {
        let iterations = self.config.iterations();

        writeln!(out, "{kernel} start")?;
        debug!(kernel = kernel.label(), iterations = iterations; "segment started");

        let mut params = vec![0.; self.config.dimension()].into_boxed_slice();
        let mut elapsed = Duration::ZERO;

        {
            let _timer = ScopedTimer::new(|d| {
                elapsed = d;
                if let Err(e) = writeln!(out, "{} msec", millis(d)) {
                    warn!("couldn't report elapsed time: {e}");
                }
            });

            repeat(&mut optimizer, &self.grad, &mut params, iterations)?;
        }

        let first = params[0];
        writeln!(out, "{first}")?;
        info!(kernel = kernel.label(), elapsed_ms = millis(elapsed); "segment finished");

        Ok(SegmentReport {
            kernel,
            elapsed,
            first,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::SUM_SEED;

    fn config(dimension: usize, iterations: usize) -> BenchConfig {
        BenchConfig::new(dimension, iterations, 0.1, 0).unwrap()
    }

    #[test]
    fn zero_iterations_keep_state() {
        let grad = [1., 2., 3.];
        let mut params = [0.; 3];

        let mut optimizer = GradientDescent::new(0.1);
        repeat(&mut optimizer, &grad, &mut params, 0).unwrap();

        assert_eq!(params, [0.; 3]);

        let mut optimizer = AdaGrad::new(3, 0.1);
        repeat(&mut optimizer, &grad, &mut params, 0).unwrap();

        assert_eq!(params, [0.; 3]);
        assert_eq!(optimizer.sum(), [SUM_SEED; 3]);

        let mut optimizer = Adam::new(3, 0.1);
        repeat(&mut optimizer, &grad, &mut params, 0).unwrap();

        assert_eq!(params, [0.; 3]);
        assert_eq!(optimizer.lambda_t(), 1.);
        assert_eq!(optimizer.beta1_t(), 1.);
        assert_eq!(optimizer.beta2_t(), 1.);
    }

    #[test]
    fn repeat_stops_at_the_first_error() {
        let grad = [1., 2., 3.];
        let mut params = [0.; 2];

        let mut optimizer = GradientDescent::new(0.1);
        assert!(repeat(&mut optimizer, &grad, &mut params, 10).is_err());
        assert_eq!(params, [0.; 2]);
    }

    #[test]
    fn sampled_gradient_is_reproducible() {
        let a = Benchmark::new(config(32, 1)).unwrap();
        let b = Benchmark::new(config(32, 1)).unwrap();

        assert_eq!(a.gradient().len(), 32);
        assert_eq!(a.gradient(), b.gradient());
    }

    #[test]
    fn sgd_segment_output() {
        let bench = Benchmark::with_gradient(config(3, 10), vec![1., 2., 3.]);
        let mut out = Vec::new();

        let report = bench.run_segment(Kernel::Sgd, &mut out).unwrap();
        assert_eq!(report.kernel, Kernel::Sgd);
        assert!((report.first - 1.).abs() < 1e-5);

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "SGD start");
        assert!(lines[1].ends_with(" msec"));
        assert_eq!(lines[2], report.first.to_string());
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = Kernel::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, ["SGD", "Ada-grad", "Adam"]);
    }
}
