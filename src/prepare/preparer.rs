use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::Fraction;
use crate::Result;

/// Everything a single-run primitive reads, built once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub matrix: Matrix,
    pub mask: Mask,
    pub weights: Weights,
}

/// Builds the observation matrix, mask and weights from columnar input.
///
/// Column order is fixed: centroid X and Y first when blending, then one
/// column per selected series in selection order.
#[derive(Debug, Clone)]
pub struct Preparer {
    transform: Transform,
    weighting: Weighting,
    centroids: Option<Vec<(Energy, Energy)>>,
}

impl Preparer {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            weighting: Weighting::Uniform,
            centroids: None,
        }
    }

    /// Blend geometric centroids into the matrix with weight `wc`.
    pub fn blend(mut self, centroids: Vec<(Energy, Energy)>, wc: Fraction) -> Result<Self> {
        self.weighting = Weighting::try_from_centroids(Some(wc))?;
        self.centroids = Some(centroids);
        Ok(self)
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    pub fn prepare(&self, series: Vec<Series>) -> Result<Prepared> {
        if series.len() < 2 && self.centroids.is_none() {
            return Err(ClusterError::TooFewVariables(series.len()));
        }
        let rows = self.rows(&series)?;
        let mut columns = Vec::with_capacity(series.len() + 2);
        if let Some(ref centroids) = self.centroids {
            columns.push(centroids.iter().map(|(x, _)| *x).collect::<Vec<Energy>>());
            columns.push(centroids.iter().map(|(_, y)| *y).collect::<Vec<Energy>>());
        }
        columns.extend(series.into_iter().map(Series::into_values));
        columns
            .iter_mut()
            .for_each(|column| self.transform.apply(column));
        let matrix = Matrix::from_columns(rows, &columns)?;
        let mask = Mask::valid(rows, matrix.cols());
        let weights = self.weighting.weights(matrix.cols());
        log::info!(
            "{:<32}{:<32}",
            "prepared matrix",
            format!("{} x {} {}", matrix.rows(), matrix.cols(), self.transform)
        );
        Ok(Prepared {
            matrix,
            mask,
            weights,
        })
    }

    /// Every series and the centroid list must agree on the row count.
    fn rows(&self, series: &[Series]) -> Result<usize> {
        let rows = self
            .centroids
            .as_ref()
            .map(Vec::len)
            .or_else(|| series.first().map(Series::len))
            .unwrap_or(0);
        match series.iter().find(|s| s.len() != rows) {
            Some(s) => Err(ClusterError::Shape(format!(
                "{} has {} values, expected {}",
                s.name(),
                s.len(),
                rows
            ))),
            None => Ok(rows),
        }
    }
}
