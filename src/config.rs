use crate::Fraction;
use crate::Method;
use crate::Metric;
use crate::Transform;
use serde::Deserialize;
use serde::Serialize;

/// Everything a clustering session needs to know, loadable from JSON.
///
/// Missing fields fall back to the crate defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of clusters.
    pub k: usize,
    /// Minimum observations per cluster.
    pub min_size: usize,
    pub transform: Transform,
    pub method: Method,
    pub metric: Metric,
    /// Total restart budget, split across workers.
    pub npass: usize,
    /// Iteration cap of one restart.
    pub maxiter: usize,
    /// Base seed. A fresh one is drawn per run when absent.
    pub seed: Option<u64>,
    /// Weight of geometric centroids in `[0, 1]`. Absent or 0 disables blending.
    pub centroids: Option<Fraction>,
    /// Catalogue labels of the selected variables, in order.
    pub variables: Vec<String>,
    /// Name of the integer field that receives the labels.
    pub field: String,
    /// Worker count override. Defaults to the hardware concurrency.
    pub threads: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            k: crate::DEFAULT_CLUSTERS,
            min_size: crate::DEFAULT_MIN_SIZE,
            transform: Transform::default(),
            method: Method::default(),
            metric: Metric::default(),
            npass: crate::DEFAULT_PASSES,
            maxiter: crate::DEFAULT_ITERATIONS,
            seed: None,
            centroids: None,
            variables: Vec::new(),
            field: String::from("CL"),
            threads: None,
        }
    }
}

impl Settings {
    /// Centroid weight when blending is switched on.
    pub fn blending(&self) -> Option<Fraction> {
        self.centroids.filter(|&wc| wc != 0.)
    }
}
