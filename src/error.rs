use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClusterError>;

/// Everything that can stop a clustering invocation.
///
/// Validation variants are raised before any computation starts and leave
/// no partial state behind. Primitive faults are isolated to the partition
/// that raised them. `Exhausted` is fatal for the invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("number of clusters must lie in 2..={max}, got {k}")]
    Clusters { k: usize, max: usize },

    #[error("the value for minimum number per cluster should be at most {bound}, got {min_size}")]
    MinimumSize { min_size: usize, bound: usize },

    #[error("geometric centroids requested but the dataset carries no geometry")]
    NoGeometry,

    #[error("please select at least 2 variables, got {0}")]
    TooFewVariables(usize),

    #[error("please enter a field name for saving clustering results")]
    EmptyField,

    #[error("variable {0} is no longer in the table")]
    UnknownVariable(String),

    #[error("field {0} already exists with a non-integer type")]
    FieldType(String),

    #[error("number of passes must be at least 1")]
    Passes,

    #[error("number of iterations must be at least 1")]
    Iterations,

    #[error("centroid weight must lie in [0, 1], got {0}")]
    CentroidWeight(f64),

    #[error("shape mismatch: {0}")]
    Shape(String),

    #[error("single-run primitive failed: {0}")]
    Primitive(String),

    #[error("cluster id {id} outside 1..={k} at observation {index}")]
    Assignment { index: usize, id: usize, k: usize },

    #[error("every partition failed, no clustering to select")]
    Exhausted,

    #[error("worker pool: {0}")]
    ThreadPool(String),
}

impl ClusterError {
    /// Raised before any computation starts.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Clusters { .. }
                | Self::MinimumSize { .. }
                | Self::NoGeometry
                | Self::TooFewVariables(_)
                | Self::EmptyField
                | Self::UnknownVariable(_)
                | Self::FieldType(_)
                | Self::Passes
                | Self::Iterations
                | Self::CentroidWeight(_)
                | Self::Shape(_)
        )
    }
}
