//! Data preparation: observation matrix, validity mask and column weights.
mod matrix;
mod preparer;
mod series;
mod transform;
mod weighting;

pub use matrix::*;
pub use preparer::*;
pub use series::*;
pub use transform::*;
pub use weighting::*;
