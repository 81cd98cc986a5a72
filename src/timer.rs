use std::time::{Duration, Instant};

/// Measures the wall-clock time of a scope.
///
/// The start is captured on construction and `report` is called exactly once with the elapsed
/// time when the timer is dropped, no matter how the scope is left.
pub struct ScopedTimer<F: FnOnce(Duration)> {
    start: Instant,
    report: Option<F>,
}

impl<F: FnOnce(Duration)> ScopedTimer<F> {
    /// Starts a new `ScopedTimer`.
    ///
    /// # Arguments
    /// * `report` - Receives the elapsed time once the timer goes out of scope.
    pub fn new(report: F) -> Self {
        Self {
            start: Instant::now(),
            report: Some(report),
        }
    }
}

impl<F: FnOnce(Duration)> Drop for ScopedTimer<F> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();

        if let Some(report) = self.report.take() {
            report(elapsed);
        }
    }
}

/// Fractional milliseconds in `elapsed`.
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.
}
