use std::{error::Error, fmt, io};

use rand_distr::uniform::Error as UniformError;

/// The benchmark's result type.
pub type Result<T> = std::result::Result<T, BenchErr>;

/// Benchmark failures.
#[derive(Debug)]
pub enum BenchErr {
    /// A kernel received vectors of different lengths, nothing was mutated.
    DimensionMismatch { expected: usize, got: usize },
    /// The benchmark can't be set up with the given values.
    InvalidConfiguration(String),
    Io(io::Error),
}

impl fmt::Display for BenchErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchErr::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: got {got}, expected {expected}")
            }
            BenchErr::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            BenchErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for BenchErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BenchErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BenchErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<UniformError> for BenchErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidConfiguration(value.to_string())
    }
}

/// Boundary conversion for the binary.
impl From<BenchErr> for io::Error {
    fn from(value: BenchErr) -> Self {
        match value {
            BenchErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

/// Fails with `DimensionMismatch` unless `got` equals `expected`.
pub(crate) fn check_len(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(BenchErr::DimensionMismatch { expected, got });
    }

    Ok(())
}
