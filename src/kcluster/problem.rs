use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::Mask;
use crate::Matrix;
use crate::Prepared;
use crate::Result;
use crate::Weights;

/// Everything a single run reads. Borrowed, never mutated, shared by all workers.
#[derive(Debug, Clone, Copy)]
pub struct Problem<'a> {
    /// Target cluster count.
    pub k: usize,
    pub matrix: &'a Matrix,
    pub mask: &'a Mask,
    pub weights: &'a Weights,
    /// Cluster columns instead of rows. Always false on the multi-start path.
    pub transpose: bool,
    /// Iteration cap of one restart.
    pub maxiter: usize,
    pub method: Method,
    pub metric: Metric,
    /// Smallest admissible cluster size.
    pub min_size: usize,
}

impl<'a> Problem<'a> {
    pub fn new(k: usize, prepared: &'a Prepared) -> Self {
        Self {
            k,
            matrix: &prepared.matrix,
            mask: &prepared.mask,
            weights: &prepared.weights,
            transpose: false,
            maxiter: crate::DEFAULT_ITERATIONS,
            method: Method::default(),
            metric: Metric::default(),
            min_size: crate::DEFAULT_MIN_SIZE,
        }
    }
    pub fn maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }
    pub fn cols(&self) -> usize {
        self.matrix.cols()
    }
    /// Effective size floor, at least one observation per cluster.
    pub fn floor(&self) -> usize {
        self.min_size.max(1)
    }

    /// Reject problems no restart could satisfy.
    pub fn check(&self) -> Result<()> {
        if self.transpose {
            return Err(ClusterError::Primitive("column clustering unsupported".into()));
        }
        if self.mask.rows() != self.rows() || self.mask.cols() != self.cols() {
            return Err(ClusterError::Shape("mask differs from matrix".into()));
        }
        if self.weights.len() != self.cols() {
            return Err(ClusterError::Shape("one weight per column expected".into()));
        }
        if self.k == 0 || self.k > self.rows() {
            return Err(ClusterError::Primitive(format!(
                "{} clusters over {} observations",
                self.k,
                self.rows()
            )));
        }
        if self.k * self.floor() > self.rows() {
            return Err(ClusterError::Primitive(format!(
                "{} clusters of at least {} exceed {} observations",
                self.k,
                self.floor(),
                self.rows()
            )));
        }
        if self.maxiter == 0 {
            return Err(ClusterError::Iterations);
        }
        Ok(())
    }
}

/// Outcome of one single-run invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Objective error, lower is better.
    pub error: Energy,
    /// 0-origin cluster id per observation.
    pub assignment: Vec<usize>,
    /// Restarts that reached this partition.
    pub found: usize,
}

impl Run {
    pub fn new(error: Energy, assignment: Vec<usize>) -> Self {
        Self {
            error,
            assignment,
            found: 1,
        }
    }
    /// 1-origin ids, the numbering the canonicalizer consumes.
    pub fn labels(&self) -> Vec<usize> {
        self.assignment.iter().map(|j| j + 1).collect()
    }
}

/// Contract of the single-run clustering primitive.
///
/// Given a problem and a restart budget, return the best partition found
/// over `npass` randomized restarts. The same `seed` must reproduce the
/// same run. Implementations are shared across worker threads.
pub trait Clusterer: Sync {
    fn kcluster(&self, problem: &Problem<'_>, npass: usize, seed: u64) -> Result<Run>;
}
