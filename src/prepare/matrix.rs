use crate::ClusterError;
use crate::Energy;
use crate::Fraction;
use crate::Result;

/// Dense row-major observation matrix.
///
/// Rows are observations, columns are variables after transform and
/// centroid expansion. Built once by the [`crate::Preparer`] and then
/// only ever read, so workers share it by reference without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Energy>,
}

impl Matrix {
    /// Assemble from column vectors that must all have `rows` entries.
    pub fn from_columns(rows: usize, columns: &[Vec<Energy>]) -> Result<Self> {
        if let Some((j, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != rows) {
            return Err(ClusterError::Shape(format!(
                "column {} has {} values, expected {}",
                j,
                col.len(),
                rows
            )));
        }
        let cols = columns.len();
        let data = (0..rows)
            .flat_map(|i| columns.iter().map(move |col| col[i]))
            .collect::<Vec<Energy>>();
        Ok(Self { rows, cols, data })
    }
    /// Assemble from rows that must all share one length.
    pub fn from_rows(rows: &[Vec<Energy>]) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ClusterError::Shape("ragged rows".to_string()));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.concat(),
        })
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn row(&self, i: usize) -> &[Energy] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn get(&self, i: usize, j: usize) -> Energy {
        self.data[i * self.cols + j]
    }
    pub fn column(&self, j: usize) -> Vec<Energy> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }
}

/// Validity of each matrix cell. `true` means the value takes part in
/// distance and centroid computations.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    cols: usize,
    data: Vec<bool>,
}

impl Mask {
    /// Every cell valid.
    pub fn valid(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            data: vec![true; rows * cols],
        }
    }
    pub fn row(&self, i: usize) -> &[bool] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.data[i * self.cols + j]
    }
    /// Mark a single cell as missing.
    pub fn invalidate(&mut self, i: usize, j: usize) {
        self.data[i * self.cols + j] = false;
    }
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.data.len() / self.cols
        }
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Non-negative per-column scaling factors.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights(Vec<Fraction>);

impl Weights {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, j: usize) -> Fraction {
        self.0[j]
    }
    pub fn as_slice(&self) -> &[Fraction] {
        &self.0
    }
}

impl From<Vec<Fraction>> for Weights {
    fn from(weights: Vec<Fraction>) -> Self {
        Self(weights)
    }
}
