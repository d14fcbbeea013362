//! The single-run clustering primitive: its contract and a built-in implementation.
mod centroid;
mod kcluster;
mod method;
mod metric;
mod problem;

pub use centroid::*;
pub use kcluster::*;
pub use method::*;
pub use metric::*;
pub use problem::*;
