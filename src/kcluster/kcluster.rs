use super::*;
use crate::Energy;
use crate::Labeling;
use crate::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Built-in single-run primitive: k-means (or k-medians) with restarts.
///
/// Each restart starts from a random balanced assignment that already
/// respects the size floor, seeds centers (k-means++ or centroids of that
/// assignment), then alternates reassignment and center updates until no
/// observation moves or the iteration cap is hit. An observation never
/// leaves a cluster that would drop below the floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct KCluster;

impl Clusterer for KCluster {
    fn kcluster(&self, problem: &Problem<'_>, npass: usize, seed: u64) -> Result<Run> {
        problem.check()?;
        if npass == 0 {
            return Err(crate::ClusterError::Passes);
        }
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let mut best = None::<(Run, Labeling)>;
        for pass in 0..npass {
            let restart = Restart::new(problem).run(rng);
            let partition = Labeling::from_zero_based(&restart.assignment, problem.k)?;
            log::trace!("{:<32}{:<32}", format!("restart {}", pass), restart.error);
            best = match best {
                None => Some((restart, partition)),
                Some((mut run, known)) if known == partition => {
                    run.found += 1;
                    Some((run, known))
                }
                Some((run, _)) if restart.error < run.error => Some((restart, partition)),
                Some(kept) => Some(kept),
            };
        }
        best.map(|(run, _)| run)
            .ok_or_else(|| crate::ClusterError::Primitive("no restart completed".into()))
    }
}

/// One randomized restart over a borrowed problem.
struct Restart<'p, 'a> {
    problem: &'p Problem<'a>,
    assignment: Vec<usize>,
    counts: Vec<usize>,
}

impl<'p, 'a> Restart<'p, 'a> {
    fn new(problem: &'p Problem<'a>) -> Self {
        Self {
            problem,
            assignment: vec![0; problem.rows()],
            counts: vec![0; problem.k],
        }
    }

    fn run(mut self, rng: &mut SmallRng) -> Run {
        self.balance(rng);
        let mut centers = match self.problem.method.init {
            Init::Random => self.centroids(),
            Init::PlusPlus => self.plusplus(rng),
        };
        for _ in 0..self.problem.maxiter {
            let moved = self.reassign(&centers);
            centers = self.centroids();
            if !moved {
                break;
            }
        }
        Run::new(self.error(&centers), self.assignment)
    }

    fn distance(&self, i: usize, center: &Centroid) -> Energy {
        self.problem.metric.distance(
            (self.problem.matrix.row(i), self.problem.mask.row(i)),
            (center.values(), center.valid()),
            self.problem.weights.as_slice(),
        )
    }

    /// Shuffle observations, give every cluster `floor` of them, scatter the rest.
    fn balance(&mut self, rng: &mut SmallRng) {
        use rand::seq::SliceRandom;
        let floor = self.problem.floor();
        let k = self.problem.k;
        let mut order = (0..self.problem.rows()).collect::<Vec<usize>>();
        order.shuffle(rng);
        for (position, i) in order.into_iter().enumerate() {
            let j = match position < k * floor {
                true => position / floor,
                false => rng.random_range(0..k),
            };
            self.assignment[i] = j;
            self.counts[j] += 1;
        }
    }

    fn centroids(&self) -> Vec<Centroid> {
        (0..self.problem.k)
            .map(|j| {
                self.assignment
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| **a == j)
                    .map(|(i, _)| i)
                    .collect::<Vec<usize>>()
            })
            .map(|members| {
                Centroid::from_members(
                    self.problem.method.center,
                    self.problem.matrix,
                    self.problem.mask,
                    &members,
                )
            })
            .collect()
    }

    /// k-means++ seeding over observations.
    fn plusplus(&self, rng: &mut SmallRng) -> Vec<Centroid> {
        use rand::distr::Distribution;
        use rand::distr::weighted::WeightedIndex;
        let n = self.problem.rows();
        let mut potentials = vec![Energy::INFINITY; n];
        let mut centers = Vec::with_capacity(self.problem.k);
        let mut i = rng.random_range(0..n);
        while centers.len() < self.problem.k {
            let center = Centroid::from_row(self.problem.matrix, self.problem.mask, i);
            potentials = (0..n)
                .into_par_iter()
                .map(|x| self.distance(x, &center))
                .map(|d| d * d)
                .zip(potentials.par_iter())
                .map(|(d0, d1)| Energy::min(d0, *d1))
                .collect::<Vec<Energy>>();
            centers.push(center);
            i = match WeightedIndex::new(potentials.iter()) {
                Ok(weights) => weights.sample(rng),
                Err(_) => rng.random_range(0..n),
            };
        }
        centers
    }

    /// Move every observation to its nearest center when the floor allows.
    /// Returns whether anything moved.
    fn reassign(&mut self, centers: &[Centroid]) -> bool {
        let floor = self.problem.floor();
        let nearest = (0..self.problem.rows())
            .into_par_iter()
            .map(|i| {
                centers
                    .iter()
                    .enumerate()
                    .map(|(j, c)| (j, self.distance(i, c)))
                    .fold((self.assignment[i], Energy::INFINITY), |best, (j, d)| {
                        let current = self.assignment[i];
                        match d < best.1 || (d == best.1 && j == current) {
                            true => (j, d),
                            false => best,
                        }
                    })
                    .0
            })
            .collect::<Vec<usize>>();
        let mut moved = false;
        for (i, j) in nearest.into_iter().enumerate() {
            let current = self.assignment[i];
            if j != current && self.counts[current] > floor {
                self.counts[current] -= 1;
                self.counts[j] += 1;
                self.assignment[i] = j;
                moved = true;
            }
        }
        moved
    }

    fn error(&self, centers: &[Centroid]) -> Energy {
        (0..self.problem.rows())
            .into_par_iter()
            .map(|i| self.distance(i, &centers[self.assignment[i]]))
            .collect::<Vec<Energy>>()
            .into_iter()
            .sum()
    }
}
