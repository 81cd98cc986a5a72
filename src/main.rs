use std::io;

use log::{info, warn};

use optimizer_bench::{BenchConfig, Benchmark, Kernel};

fn main() -> io::Result<()> {
    env_logger::init();

    let config = BenchConfig::default();
    info!(
        "dimension={} iterations={} learning_rate={} seed={}",
        config.dimension(),
        config.iterations(),
        config.learning_rate(),
        config.seed()
    );

    let bench = Benchmark::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let failed = bench.run(&mut out).iter().filter(|res| res.is_err()).count();
    if failed > 0 {
        warn!("{failed} of {} segments failed", Kernel::ALL.len());
    }

    Ok(())
}
