use crate::Energy;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Objective error used as a pool key.
///
/// Ordered and compared by bit pattern, so two runs collide exactly when
/// their errors are bit-identical.
#[derive(Debug, Clone, Copy)]
pub struct Objective(Energy);

impl Objective {
    pub fn value(&self) -> Energy {
        self.0
    }
}

impl From<Energy> for Objective {
    fn from(error: Energy) -> Self {
        Self(error)
    }
}

impl PartialEq for Objective {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Objective {}
impl PartialOrd for Objective {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Objective {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Results of every completed partition, keyed by objective error.
///
/// Written concurrently by workers, read only after they all joined.
/// Equal keys collapse to one entry and the later write wins; a run whose
/// error equals an earlier run's bit for bit silently replaces it.
#[derive(Debug, Default)]
pub struct Pool {
    runs: Mutex<BTreeMap<Objective, Vec<usize>>>,
}

impl Pool {
    /// Record 1-origin labels under their error. Returns the labels this
    /// write displaced, if any.
    pub fn insert(&self, error: Energy, labels: Vec<usize>) -> Option<Vec<usize>> {
        self.runs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(Objective::from(error), labels)
    }

    pub fn len(&self) -> usize {
        self.runs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the entries once every writer has finished.
    pub fn into_inner(self) -> BTreeMap<Objective, Vec<usize>> {
        self.runs
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_errors_collapse_last_write_wins() {
        let pool = Pool::default();
        assert_eq!(pool.insert(0.25, vec![1, 1, 2]), None);
        assert_eq!(pool.insert(0.25, vec![2, 1, 1]), Some(vec![1, 1, 2]));
        assert_eq!(pool.len(), 1);
        let entries = pool.into_inner();
        assert_eq!(entries.values().next(), Some(&vec![2, 1, 1]));
    }

    #[test]
    fn distinct_errors_coexist() {
        let pool = Pool::default();
        pool.insert(0.25, vec![1]);
        pool.insert(0.25 + f64::EPSILON, vec![1]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn concurrent_writers() {
        let pool = Pool::default();
        std::thread::scope(|s| {
            for t in 0..8 {
                let pool = &pool;
                s.spawn(move || pool.insert(t as f64, vec![t]));
            }
        });
        assert_eq!(pool.len(), 8);
    }
}
