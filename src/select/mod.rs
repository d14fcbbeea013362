//! Best-run selection and deterministic relabelling.
mod labeling;
mod selection;

pub use labeling::*;
pub use selection::*;
