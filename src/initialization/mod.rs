mod random;

pub use random::{RAND_MAX, RandGradGen};
