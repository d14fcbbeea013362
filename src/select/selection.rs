use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::Pool;
use crate::Result;

/// The winning run of a multi-start pass, canonically relabelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub error: Energy,
    pub labeling: Labeling,
}

impl Selection {
    /// Pick the minimum-error entry and canonicalize its labels.
    ///
    /// Fails with [`ClusterError::Exhausted`] when no partition completed.
    pub fn from_pool(pool: Pool, k: usize) -> Result<Self> {
        let (error, raw) = Self::minimum(pool)?;
        let labeling = Labeling::canonicalize(&raw, k)?;
        log::info!("{:<32}{:<32}", "kmeans selected", error);
        Ok(Self { error, labeling })
    }

    /// Minimum error by real-number comparison, with its raw 1-origin labels.
    pub fn minimum(pool: Pool) -> Result<(Energy, Vec<usize>)> {
        pool.into_inner()
            .into_iter()
            .map(|(objective, labels)| (objective.value(), labels))
            .filter(|(error, _)| !error.is_nan())
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .ok_or(ClusterError::Exhausted)
    }

    pub fn undefined(&self) -> Vec<bool> {
        self.labeling.undefined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_minimum_error() {
        let pool = Pool::default();
        pool.insert(0.9, vec![1, 1, 2, 2]);
        pool.insert(0.5, vec![2, 1, 2, 1]);
        pool.insert(0.7, vec![1, 2, 2, 2]);
        let (error, raw) = Selection::minimum(pool).unwrap();
        assert_eq!(error, 0.5);
        assert_eq!(raw, vec![2, 1, 2, 1]);
    }

    #[test]
    fn selection_is_canonical() {
        let pool = Pool::default();
        pool.insert(0.9, vec![1, 1, 2, 2]);
        pool.insert(0.5, vec![2, 1, 2, 1]);
        let selection = Selection::from_pool(pool, 2).unwrap();
        assert_eq!(selection.error, 0.5);
        assert_eq!(selection.labeling.ids(), &[1, 2, 1, 2]);
        assert_eq!(selection.undefined(), vec![false; 4]);
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let err = Selection::from_pool(Pool::default(), 3).unwrap_err();
        assert_eq!(err, ClusterError::Exhausted);
    }
}
