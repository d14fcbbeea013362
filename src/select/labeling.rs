use crate::ClusterError;
use crate::Label;
use crate::Result;

/// Content-ordered cluster ids, 1-based, one per observation.
///
/// Clusters are numbered by the lexicographic order of their sorted member
/// indices, so any two raw labelings of the same partition canonicalize to
/// the same sequence. A cluster with no members sorts first and takes its
/// number without appearing in the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Labeling {
    k: usize,
    ids: Vec<usize>,
}

impl Labeling {
    /// Canonicalize raw 1-based ids in `1..=k`.
    pub fn canonicalize(raw: &[usize], k: usize) -> Result<Self> {
        let mut groups = vec![Vec::<usize>::new(); k];
        for (index, &id) in raw.iter().enumerate() {
            match id {
                0 => return Err(ClusterError::Assignment { index, id, k }),
                id if id > k => return Err(ClusterError::Assignment { index, id, k }),
                id => groups[id - 1].push(index),
            }
        }
        groups.sort();
        let mut ids = vec![0; raw.len()];
        groups.iter().enumerate().for_each(|(c, group)| {
            group.iter().for_each(|&i| ids[i] = c + 1);
        });
        Ok(Self { k, ids })
    }

    /// Canonicalize raw 0-based ids in `0..k`.
    pub fn from_zero_based(raw: &[usize], k: usize) -> Result<Self> {
        Self::canonicalize(&raw.iter().map(|j| j + 1).collect::<Vec<_>>(), k)
    }

    pub fn k(&self) -> usize {
        self.k
    }
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    /// Integer column values.
    pub fn labels(&self) -> Vec<Label> {
        self.ids.iter().map(|&id| id as Label).collect()
    }
    /// Undefined flags to accompany the labels. Never set on this path.
    pub fn undefined(&self) -> Vec<bool> {
        vec![false; self.ids.len()]
    }
    /// Member count per cluster id.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k];
        self.ids.iter().for_each(|&id| sizes[id - 1] += 1);
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_member_indices() {
        let labeling = Labeling::canonicalize(&[3, 1, 3, 2, 1, 2], 3).unwrap();
        // {0,2} < {1,4} < {3,5}
        assert_eq!(labeling.ids(), &[1, 2, 1, 3, 2, 3]);
    }

    #[test]
    fn idempotent() {
        let once = Labeling::canonicalize(&[2, 2, 1, 3, 1, 3, 2], 3).unwrap();
        let twice = Labeling::canonicalize(once.ids(), 3).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn invariant_under_relabelling() {
        let raw = [1, 2, 3, 1, 2, 3, 3, 1];
        let expected = Labeling::canonicalize(&raw, 3).unwrap();
        let permutations = [
            [1, 2, 3],
            [1, 3, 2],
            [2, 1, 3],
            [2, 3, 1],
            [3, 1, 2],
            [3, 2, 1],
        ];
        for p in permutations {
            let relabelled = raw.iter().map(|&id| p[id - 1]).collect::<Vec<_>>();
            assert_eq!(Labeling::canonicalize(&relabelled, 3).unwrap(), expected);
        }
    }

    #[test]
    fn lexicographic_not_by_size() {
        // {0,5} sorts before {1,2,3,4} although it is smaller
        let labeling = Labeling::canonicalize(&[2, 1, 1, 1, 1, 2], 2).unwrap();
        assert_eq!(labeling.ids(), &[1, 2, 2, 2, 2, 1]);
        assert_eq!(labeling.sizes(), vec![2, 4]);
    }

    #[test]
    fn empty_cluster_takes_first_number() {
        let labeling = Labeling::canonicalize(&[1, 1, 3], 3).unwrap();
        assert_eq!(labeling.ids(), &[2, 2, 3]);
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        assert_eq!(
            Labeling::canonicalize(&[1, 4], 3).unwrap_err(),
            ClusterError::Assignment { index: 1, id: 4, k: 3 }
        );
        assert!(Labeling::canonicalize(&[0, 1], 3).is_err());
    }

    #[test]
    fn zero_based_matches_one_based() {
        assert_eq!(
            Labeling::from_zero_based(&[2, 0, 1], 3).unwrap(),
            Labeling::canonicalize(&[3, 1, 2], 3).unwrap()
        );
    }

    #[test]
    fn labels_and_mask() {
        let labeling = Labeling::canonicalize(&[2, 1], 2).unwrap();
        assert_eq!(labeling.labels(), vec![1, 2]);
        assert_eq!(labeling.undefined(), vec![false, false]);
    }
}
