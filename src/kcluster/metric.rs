use crate::Energy;
use crate::Fraction;
use serde::Deserialize;
use serde::Serialize;

/// Distance between two observations.
///
/// Every metric is weighted per column and skips cells that either side
/// marks as invalid. Correlation-type metrics return `1 - r`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Euclidean,
    CityBlock,
    Pearson,
    AbsPearson,
    Cosine,
    AbsCosine,
    Spearman,
    Kendall,
}

impl Metric {
    /// Entries of the distance menu. Group headers select their first child.
    ///
    /// Distance, Euclidean, City-block, Correlation, Pearson, Absolute Pearson,
    /// Cosine, Signed, Un-signed, Rank, Spearman, Kendall.
    pub const MENU: [Metric; 12] = [
        Metric::Euclidean,
        Metric::Euclidean,
        Metric::CityBlock,
        Metric::Pearson,
        Metric::Pearson,
        Metric::AbsPearson,
        Metric::Cosine,
        Metric::Cosine,
        Metric::AbsCosine,
        Metric::Spearman,
        Metric::Spearman,
        Metric::Kendall,
    ];

    /// Single-character code understood by C-style clustering routines.
    pub fn code(&self) -> char {
        match self {
            Self::Euclidean => 'e',
            Self::CityBlock => 'b',
            Self::Pearson => 'c',
            Self::AbsPearson => 'a',
            Self::Cosine => 'u',
            Self::AbsCosine => 'x',
            Self::Spearman => 's',
            Self::Kendall => 'k',
        }
    }

    pub fn from_menu(selection: usize) -> Option<Self> {
        Self::MENU.get(selection).copied()
    }

    pub fn distance(
        &self,
        x: (&[Energy], &[bool]),
        y: (&[Energy], &[bool]),
        weights: &[Fraction],
    ) -> Energy {
        let pairs = Self::pairs(x, y, weights);
        match self {
            Self::Euclidean => Self::minkowski(&pairs, |d| d * d),
            Self::CityBlock => Self::minkowski(&pairs, f64::abs),
            Self::Pearson => Self::pearson(&pairs).map_or(0., |r| 1. - r),
            Self::AbsPearson => Self::pearson(&pairs).map_or(0., |r| 1. - r.abs()),
            Self::Cosine => Self::cosine(&pairs).map_or(1., |r| 1. - r),
            Self::AbsCosine => Self::cosine(&pairs).map_or(1., |r| 1. - r.abs()),
            Self::Spearman => Self::spearman(&pairs),
            Self::Kendall => Self::kendall(&pairs),
        }
    }

    /// Valid (x, y, w) triples.
    fn pairs(
        (x, mx): (&[Energy], &[bool]),
        (y, my): (&[Energy], &[bool]),
        weights: &[Fraction],
    ) -> Vec<(Energy, Energy, Fraction)> {
        x.iter()
            .zip(y.iter())
            .zip(mx.iter().zip(my.iter()))
            .zip(weights.iter())
            .filter(|(((_, _), (a, b)), _)| **a && **b)
            .map(|(((x, y), _), w)| (*x, *y, *w))
            .collect()
    }

    fn minkowski(pairs: &[(Energy, Energy, Fraction)], f: impl Fn(Energy) -> Energy) -> Energy {
        let total = pairs.iter().map(|(_, _, w)| w).sum::<Fraction>();
        if total == 0. {
            return 0.;
        }
        pairs.iter().map(|(x, y, w)| w * f(x - y)).sum::<Energy>() / total
    }

    /// Weighted Pearson correlation, `None` when undefined.
    fn pearson(pairs: &[(Energy, Energy, Fraction)]) -> Option<Energy> {
        let total = pairs.iter().map(|(_, _, w)| w).sum::<Fraction>();
        if total == 0. {
            return None;
        }
        let sx = pairs.iter().map(|(x, _, w)| w * x).sum::<Energy>();
        let sy = pairs.iter().map(|(_, y, w)| w * y).sum::<Energy>();
        let sxx = pairs.iter().map(|(x, _, w)| w * x * x).sum::<Energy>() - sx * sx / total;
        let syy = pairs.iter().map(|(_, y, w)| w * y * y).sum::<Energy>() - sy * sy / total;
        let sxy = pairs.iter().map(|(x, y, w)| w * x * y).sum::<Energy>() - sx * sy / total;
        if sxx <= 0. || syy <= 0. {
            return None;
        }
        Some(sxy / (sxx * syy).sqrt())
    }

    /// Weighted uncentered correlation, `None` when either side is all zero.
    fn cosine(pairs: &[(Energy, Energy, Fraction)]) -> Option<Energy> {
        let sxx = pairs.iter().map(|(x, _, w)| w * x * x).sum::<Energy>();
        let syy = pairs.iter().map(|(_, y, w)| w * y * y).sum::<Energy>();
        let sxy = pairs.iter().map(|(x, y, w)| w * x * y).sum::<Energy>();
        if pairs.is_empty() {
            return Some(1.);
        }
        if sxx == 0. || syy == 0. {
            return None;
        }
        Some(sxy / (sxx * syy).sqrt())
    }

    /// Pearson over average ranks, unweighted.
    fn spearman(pairs: &[(Energy, Energy, Fraction)]) -> Energy {
        if pairs.is_empty() {
            return 0.;
        }
        let rx = Self::ranks(pairs.iter().map(|(x, _, _)| *x).collect());
        let ry = Self::ranks(pairs.iter().map(|(_, y, _)| *y).collect());
        let ranked = rx
            .into_iter()
            .zip(ry)
            .map(|(x, y)| (x, y, 1.))
            .collect::<Vec<_>>();
        Self::pearson(&ranked).map_or(0., |r| 1. - r)
    }

    /// Kendall's tau-b, unweighted.
    fn kendall(pairs: &[(Energy, Energy, Fraction)]) -> Energy {
        let (mut concordant, mut discordant, mut xties, mut yties): (Energy, Energy, Energy, Energy) =
            (0., 0., 0., 0.);
        for i in 0..pairs.len() {
            for j in 0..i {
                let dx = pairs[i].0 - pairs[j].0;
                let dy = pairs[i].1 - pairs[j].1;
                match (dx != 0., dy != 0.) {
                    (true, true) if dx.signum() == dy.signum() => concordant += 1.,
                    (true, true) => discordant += 1.,
                    (true, false) => xties += 1.,
                    (false, true) => yties += 1.,
                    (false, false) => {}
                }
            }
        }
        let nx = concordant + discordant + xties;
        let ny = concordant + discordant + yties;
        if nx == 0. || ny == 0. {
            return 0.;
        }
        1. - (concordant - discordant) / (nx * ny).sqrt()
    }

    /// 0-based average ranks, ties share the mean of their positions.
    fn ranks(values: Vec<Energy>) -> Vec<Energy> {
        let mut order = (0..values.len()).collect::<Vec<usize>>();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let mut ranks = vec![0.; values.len()];
        let mut i = 0;
        while i < order.len() {
            let mut j = i;
            while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
                j += 1;
            }
            let rank = (i + j) as Energy / 2.;
            order[i..=j].iter().for_each(|&k| ranks[k] = rank);
            i = j + 1;
        }
        ranks
    }
}

impl TryFrom<char> for Metric {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'e' => Ok(Self::Euclidean),
            'b' => Ok(Self::CityBlock),
            'c' => Ok(Self::Pearson),
            'a' => Ok(Self::AbsPearson),
            'u' => Ok(Self::Cosine),
            'x' => Ok(Self::AbsCosine),
            's' => Ok(Self::Spearman),
            'k' => Ok(Self::Kendall),
            other => Err(anyhow::anyhow!("unknown distance code {}", other)),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Euclidean => write!(f, "Euclidean"),
            Self::CityBlock => write!(f, "City-block"),
            Self::Pearson => write!(f, "Pearson"),
            Self::AbsPearson => write!(f, "Absolute Pearson"),
            Self::Cosine => write!(f, "Cosine"),
            Self::AbsCosine => write!(f, "Absolute Cosine"),
            Self::Spearman => write!(f, "Spearman"),
            Self::Kendall => write!(f, "Kendall"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [bool; 3] = [true; 3];
    const ONES: [f64; 3] = [1.; 3];

    fn d(metric: Metric, x: &[f64], y: &[f64]) -> f64 {
        metric.distance((x, &VALID), (y, &VALID), &ONES)
    }

    #[test]
    fn euclidean_is_mean_squared_difference() {
        assert!((d(Metric::Euclidean, &[0., 0., 0.], &[1., 2., 2.]) - 3.).abs() < 1e-12);
    }

    #[test]
    fn city_block_is_mean_absolute_difference() {
        assert!((d(Metric::CityBlock, &[0., 0., 0.], &[1., -2., 3.]) - 2.).abs() < 1e-12);
    }

    #[test]
    fn weights_and_masks_drop_columns() {
        let x = [0., 0., 100.];
        let y = [1., 1., 0.];
        let weights = [1., 1., 0.];
        assert!((Metric::Euclidean.distance((&x, &VALID), (&y, &VALID), &weights) - 1.).abs() < 1e-12);
        let mask = [true, true, false];
        assert!((Metric::Euclidean.distance((&x, &mask), (&y, &VALID), &ONES) - 1.).abs() < 1e-12);
    }

    #[test]
    fn zero_total_weight_is_zero_distance() {
        let zeros = [0.; 3];
        let x = [0., 0., 0.];
        let y = [5., 5., 5.];
        assert_eq!(Metric::Euclidean.distance((&x, &VALID), (&y, &VALID), &zeros), 0.);
    }

    #[test]
    fn correlations_of_proportional_rows() {
        let x = [1., 2., 3.];
        let y = [2., 4., 6.];
        let z = [-1., -2., -3.];
        assert!(d(Metric::Pearson, &x, &y).abs() < 1e-12);
        assert!((d(Metric::Pearson, &x, &z) - 2.).abs() < 1e-12);
        assert!(d(Metric::AbsPearson, &x, &z).abs() < 1e-12);
        assert!(d(Metric::Cosine, &x, &y).abs() < 1e-12);
        assert!(d(Metric::AbsCosine, &x, &z).abs() < 1e-12);
    }

    #[test]
    fn rank_metrics_see_monotone_rows() {
        let x = [1., 2., 3.];
        let y = [1., 10., 100.];
        assert!(d(Metric::Spearman, &x, &y).abs() < 1e-12);
        assert!(d(Metric::Kendall, &x, &y).abs() < 1e-12);
        let z = [3., 2., 1.];
        assert!((d(Metric::Kendall, &x, &z) - 2.).abs() < 1e-12);
    }

    #[test]
    fn ties_share_ranks() {
        assert_eq!(Metric::ranks(vec![5., 1., 5., 3.]), vec![2.5, 0., 2.5, 1.]);
    }

    #[test]
    fn menu_headers_select_first_child() {
        let codes = Metric::MENU.iter().map(Metric::code).collect::<String>();
        assert_eq!(codes, "eebccauuxssk");
        assert_eq!(Metric::from_menu(6), Some(Metric::Cosine));
        assert_eq!(Metric::from_menu(12), None);
        assert_eq!(Metric::try_from('x').unwrap(), Metric::AbsCosine);
    }
}
