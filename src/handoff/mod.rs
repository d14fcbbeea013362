//! Delivery of final labels to storage and visualization collaborators.
mod handoff;
mod storage;
mod table;
mod visualize;

pub use handoff::*;
pub use storage::*;
pub use table::*;
pub use visualize::*;
