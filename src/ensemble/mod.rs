//! Parallel multi-start optimization over a fresh worker pool.
mod optimizer;
mod partition;
mod pool;

pub use optimizer::*;
pub use partition::*;
pub use pool::*;
