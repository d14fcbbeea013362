use crate::Energy;
use serde::Deserialize;
use serde::Serialize;

/// Per-column transform applied uniformly to every matrix column of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Raw,
    Demean,
    #[default]
    Standardize,
}

impl Transform {
    /// Selector order of the transform menu.
    pub const MENU: [Transform; 3] = [Transform::Raw, Transform::Demean, Transform::Standardize];

    /// Transform a column in place.
    pub fn apply(&self, values: &mut [Energy]) {
        match self {
            Self::Raw => {}
            Self::Demean => Self::demean(values),
            Self::Standardize => Self::standardize(values),
        }
    }

    fn mean(values: &[Energy]) -> Energy {
        values.iter().sum::<Energy>() / values.len() as Energy
    }

    fn demean(values: &mut [Energy]) {
        if values.is_empty() {
            return;
        }
        let mean = Self::mean(values);
        values.iter_mut().for_each(|x| *x -= mean);
    }

    /// Sample standard deviation (n - 1). Constant columns stay untouched.
    fn standardize(values: &mut [Energy]) {
        if values.len() <= 1 {
            return;
        }
        let mean = Self::mean(values);
        let ss = values.iter().map(|x| (x - mean) * (x - mean)).sum::<Energy>();
        if ss == 0. {
            log::debug!("{:<32}{:<32}", "zero variance column", "left as is");
            return;
        }
        let sd = (ss / (values.len() - 1) as Energy).sqrt();
        values.iter_mut().for_each(|x| *x = (*x - mean) / sd);
    }
}

impl TryFrom<usize> for Transform {
    type Error = anyhow::Error;
    fn try_from(selection: usize) -> Result<Self, Self::Error> {
        Self::MENU
            .get(selection)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no transform at selection {}", selection))
    }
}

impl TryFrom<&str> for Transform {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "demean" => Ok(Self::Demean),
            "standardize" => Ok(Self::Standardize),
            other => Err(anyhow::anyhow!("unknown transform {}", other)),
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "Raw"),
            Self::Demean => write!(f, "Demean"),
            Self::Standardize => write!(f, "Standardize"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moments(values: &[Energy]) -> (Energy, Energy) {
        let n = values.len() as Energy;
        let mean = values.iter().sum::<Energy>() / n;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<Energy>() / (n - 1.);
        (mean, var.sqrt())
    }

    #[test]
    fn standardize_centers_and_scales() {
        let mut values = vec![3., 7., 1., 9., 4., 12., -2.];
        Transform::Standardize.apply(&mut values);
        let (mean, sd) = moments(&values);
        assert!(mean.abs() < 1e-12);
        assert!((sd - 1.).abs() < 1e-12);
    }

    #[test]
    fn standardize_leaves_constant_column() {
        let mut values = vec![5., 5., 5.];
        Transform::Standardize.apply(&mut values);
        assert_eq!(values, vec![5., 5., 5.]);
    }

    #[test]
    fn demean_subtracts_mean() {
        let mut values = vec![1., 2., 3., 6.];
        Transform::Demean.apply(&mut values);
        assert_eq!(values, vec![-2., -1., 0., 3.]);
    }

    #[test]
    fn raw_is_identity() {
        let mut values = vec![1., 2., 3.];
        Transform::Raw.apply(&mut values);
        assert_eq!(values, vec![1., 2., 3.]);
    }

    #[test]
    fn menu_order() {
        assert_eq!(Transform::try_from(0usize).unwrap(), Transform::Raw);
        assert_eq!(Transform::try_from(2usize).unwrap(), Transform::Standardize);
        assert!(Transform::try_from(3usize).is_err());
        assert_eq!(Transform::try_from("Demean").unwrap(), Transform::Demean);
    }
}
