pub mod bench;
pub mod config;
pub mod error;
pub mod initialization;
pub mod optimization;
pub mod timer;

pub use bench::{Benchmark, Kernel, SegmentReport};
pub use config::BenchConfig;
pub use error::{BenchErr, Result};
