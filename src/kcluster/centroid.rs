use super::*;
use crate::Energy;
use crate::Mask;
use crate::Matrix;

/// A cluster center with per-column validity.
///
/// A column is invalid when no member of the cluster has a valid value there.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    values: Vec<Energy>,
    valid: Vec<bool>,
}

impl Centroid {
    pub fn values(&self) -> &[Energy] {
        &self.values
    }
    pub fn valid(&self) -> &[bool] {
        &self.valid
    }

    /// Copy an observation as a center.
    pub fn from_row(matrix: &Matrix, mask: &Mask, i: usize) -> Self {
        Self {
            values: matrix.row(i).to_vec(),
            valid: mask.row(i).to_vec(),
        }
    }

    /// Center of the observations in `members`.
    pub fn from_members(center: Center, matrix: &Matrix, mask: &Mask, members: &[usize]) -> Self {
        let (values, valid) = (0..matrix.cols())
            .map(|j| {
                let ref mut column = members
                    .iter()
                    .filter(|&&i| mask.get(i, j))
                    .map(|&i| matrix.get(i, j))
                    .collect::<Vec<Energy>>();
                match column.len() {
                    0 => (0., false),
                    _ => (Self::reduce(center, column), true),
                }
            })
            .unzip();
        Self { values, valid }
    }

    fn reduce(center: Center, column: &mut [Energy]) -> Energy {
        match center {
            Center::Mean => column.iter().sum::<Energy>() / column.len() as Energy,
            Center::Median => {
                column.sort_by(Energy::total_cmp);
                let n = column.len();
                match n % 2 {
                    1 => column[n / 2],
                    _ => (column[n / 2 - 1] + column[n / 2]) / 2.,
                }
            }
        }
    }
}
