use crate::CENTROID_PARITY;
use crate::ClusterError;
use crate::Fraction;
use crate::Result;
use crate::Weights;

/// Column weighting policy. Exactly one of these produces the weights of a run.
///
/// The two centroid columns, when present, always sit at positions 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    /// No centroid blending: every column weighs 1.
    Uniform,
    /// Centroid columns weigh `wc`, every other column `1 - wc`.
    Blend(Fraction),
    /// `wc` sits exactly at parity: every column, centroids included, weighs 1.
    Parity,
}

impl Weighting {
    /// Pick the policy for an optional centroid weight.
    pub fn try_from_centroids(wc: Option<Fraction>) -> Result<Self> {
        match wc {
            None => Ok(Self::Uniform),
            Some(wc) if !wc.is_finite() || !(0. ..=1.).contains(&wc) => {
                Err(ClusterError::CentroidWeight(wc))
            }
            Some(wc) if wc == CENTROID_PARITY => Ok(Self::Parity),
            Some(wc) => Ok(Self::Blend(wc)),
        }
    }

    /// Whether the matrix carries the two centroid columns.
    pub fn blends(&self) -> bool {
        !matches!(self, Self::Uniform)
    }

    pub fn weight(&self, column: usize) -> Fraction {
        match self {
            Self::Uniform | Self::Parity => 1.,
            Self::Blend(wc) if column < 2 => *wc,
            Self::Blend(wc) => 1. - wc,
        }
    }

    pub fn weights(&self, columns: usize) -> Weights {
        (0..columns)
            .map(|j| self.weight(j))
            .collect::<Vec<Fraction>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_collapses_to_ones() {
        let w = Weighting::try_from_centroids(Some(0.5)).unwrap();
        assert_eq!(w, Weighting::Parity);
        assert_eq!(w.weights(5).as_slice(), &[1.; 5]);
    }

    #[test]
    fn zero_silences_centroids() {
        let w = Weighting::try_from_centroids(Some(0.)).unwrap();
        assert_eq!(w.weights(4).as_slice(), &[0., 0., 1., 1.]);
    }

    #[test]
    fn one_silences_variables() {
        let w = Weighting::try_from_centroids(Some(1.)).unwrap();
        assert_eq!(w.weights(4).as_slice(), &[1., 1., 0., 0.]);
    }

    #[test]
    fn near_parity_does_not_collapse() {
        let w = Weighting::try_from_centroids(Some(0.51)).unwrap();
        let weights = w.weights(3);
        assert_eq!(weights.get(0), 0.51);
        assert!((weights.get(2) - 0.49).abs() < 1e-12);
    }

    #[test]
    fn no_centroids_is_uniform() {
        let w = Weighting::try_from_centroids(None).unwrap();
        assert!(!w.blends());
        assert_eq!(w.weights(3).as_slice(), &[1., 1., 1.]);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(Weighting::try_from_centroids(Some(1.5)).is_err());
        assert!(Weighting::try_from_centroids(Some(f64::NAN)).is_err());
    }
}
