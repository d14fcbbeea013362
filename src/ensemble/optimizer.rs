use super::*;
use crate::ClusterError;
use crate::Clusterer;
use crate::Problem;
use crate::Result;
use crate::Run;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// What a multi-start pass leaves behind.
#[derive(Debug)]
pub struct Outcome {
    /// Results of every partition that completed.
    pub pool: Pool,
    /// How the pass budget was split, one entry per worker.
    pub partitions: Vec<Partition>,
    /// Partitions whose primitive call failed and were dropped.
    pub failures: usize,
}

/// Parallel multi-start driver.
///
/// Splits the pass budget into one contiguous range per worker, builds a
/// fresh thread pool of exactly that many workers, runs the primitive once
/// per range and blocks until every worker has returned. Failed ranges are
/// logged and dropped, never retried.
pub struct Optimizer<'c, C>
where
    C: Clusterer,
{
    clusterer: &'c C,
    hardware: usize,
    seed: Option<u64>,
}

impl<'c, C> Optimizer<'c, C>
where
    C: Clusterer,
{
    pub fn new(clusterer: &'c C) -> Self {
        Self {
            clusterer,
            hardware: num_cpus::get(),
            seed: None,
        }
    }

    /// Override the detected hardware concurrency.
    pub fn hardware(mut self, threads: usize) -> Self {
        self.hardware = threads;
        self
    }

    /// Fix the base seed so that the whole pass is reproducible.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn optimize(&self, problem: &Problem<'_>, npass: usize) -> Result<Outcome> {
        if npass == 0 {
            return Err(ClusterError::Passes);
        }
        let partitions = Partition::plan(self.hardware, npass);
        let base = self.seed.unwrap_or_else(rand::random);
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(partitions.len())
            .thread_name(|i| format!("kclust-{}", i))
            .build()
            .map_err(|e| ClusterError::ThreadPool(e.to_string()))?;
        log::info!(
            "{:<32}{:<32}",
            "kmeans spawning",
            format!("{} workers x {} passes", partitions.len(), npass)
        );
        let pool = Pool::default();
        let failures = AtomicUsize::new(0);
        workers.scope(|s| {
            for partition in partitions.iter().copied() {
                let ref pool = pool;
                let ref failures = failures;
                s.spawn(move |_| match self.work(problem, partition, base) {
                    Ok(run) => {
                        log::debug!("{:<32}{:<32}", format!("partition {}", partition), run.error);
                        if pool.insert(run.error, run.labels()).is_some() {
                            log::debug!("{:<32}{:<32}", "objective collision", run.error);
                        }
                    }
                    Err(e) => {
                        log::warn!("{:<32}{:<32}", format!("partition {} dropped", partition), e);
                        failures.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
        });
        let failures = failures.into_inner();
        log::info!(
            "{:<32}{:<32}",
            "kmeans joined",
            format!("{} results, {} failures", pool.len(), failures)
        );
        Ok(Outcome {
            pool,
            partitions,
            failures,
        })
    }

    /// One partition: a single primitive call with the partition's span as
    /// its restart budget. Panics, NaN errors and ids outside `0..k` count
    /// as failures.
    fn work(&self, problem: &Problem<'_>, partition: Partition, base: u64) -> Result<Run> {
        let seed = Self::derive(base, partition);
        let run = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.clusterer.kcluster(problem, partition.span(), seed)
        }))
        .map_err(|_| ClusterError::Primitive(format!("panic in partition {}", partition)))??;
        if run.error.is_nan() {
            return Err(ClusterError::Primitive("objective error is NaN".into()));
        }
        if run.assignment.len() != problem.rows() {
            return Err(ClusterError::Shape(format!(
                "{} labels for {} observations",
                run.assignment.len(),
                problem.rows()
            )));
        }
        let stray = run
            .assignment
            .iter()
            .enumerate()
            .find(|(_, j)| **j >= problem.k);
        if let Some((index, &j)) = stray {
            return Err(ClusterError::Assignment {
                index,
                id: j.saturating_add(1),
                k: problem.k,
            });
        }
        Ok(run)
    }

    /// Per-partition seed, independent of scheduling order.
    fn derive(base: u64, partition: Partition) -> u64 {
        let ref mut hasher = DefaultHasher::default();
        base.hash(hasher);
        partition.lower().hash(hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Energy;
    use crate::KCluster;
    use crate::Prepared;
    use crate::Preparer;
    use crate::Series;
    use crate::Transform;
    use std::sync::Mutex;

    fn prepared() -> Prepared {
        Preparer::new(Transform::Raw)
            .prepare(vec![
                Series::from(("a", vec![0., 1., 10., 11., 20., 21.])),
                Series::from(("b", vec![0., 0., 5., 5., 0., 0.])),
            ])
            .unwrap()
    }

    /// Records the restart budgets it is asked for and fails on demand.
    struct Recorder {
        budgets: Mutex<Vec<usize>>,
        fail: fn(usize) -> bool,
    }

    impl Recorder {
        fn new(fail: fn(usize) -> bool) -> Self {
            Self {
                budgets: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl Clusterer for Recorder {
        fn kcluster(&self, problem: &Problem<'_>, npass: usize, _: u64) -> Result<Run> {
            self.budgets.lock().unwrap().push(npass);
            if (self.fail)(npass) {
                return Err(ClusterError::Primitive("boom".into()));
            }
            let assignment = (0..problem.rows()).map(|i| i % problem.k).collect();
            Ok(Run::new(npass as Energy, assignment))
        }
    }

    #[test]
    fn one_call_per_partition() {
        let ref prepared = prepared();
        let problem = Problem::new(2, prepared);
        let recorder = Recorder::new(|_| false);
        let outcome = Optimizer::new(&recorder)
            .hardware(3)
            .optimize(&problem, 7)
            .unwrap();
        let mut budgets = recorder.budgets.lock().unwrap().clone();
        budgets.sort();
        assert_eq!(budgets, vec![2, 2, 3]);
        assert_eq!(outcome.partitions.len(), 3);
        assert_eq!(outcome.failures, 0);
        // budgets 2 and 2 collide on the same error
        assert_eq!(outcome.pool.len(), 2);
    }

    #[test]
    fn failed_partitions_are_dropped() {
        let ref prepared = prepared();
        let problem = Problem::new(2, prepared);
        let recorder = Recorder::new(|npass| npass == 3);
        let outcome = Optimizer::new(&recorder)
            .hardware(2)
            .optimize(&problem, 5)
            .unwrap();
        assert_eq!(outcome.failures, 1);
        assert_eq!(outcome.pool.len(), 1);
    }

    #[test]
    fn out_of_range_ids_are_dropped() {
        struct Stray;
        impl Clusterer for Stray {
            fn kcluster(&self, problem: &Problem<'_>, npass: usize, _: u64) -> Result<Run> {
                let mut assignment = vec![0; problem.rows()];
                if npass == 2 {
                    assignment[0] = usize::MAX;
                }
                Ok(Run::new(npass as Energy, assignment))
            }
        }
        let ref prepared = prepared();
        let problem = Problem::new(2, prepared);
        let outcome = Optimizer::new(&Stray)
            .hardware(2)
            .optimize(&problem, 5)
            .unwrap();
        assert_eq!(outcome.failures, 1);
        let entries = outcome.pool.into_inner();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.keys().next().map(|o| o.value()), Some(3.));
    }

    #[test]
    fn all_failed_leaves_empty_pool() {
        let ref prepared = prepared();
        let problem = Problem::new(2, prepared);
        let recorder = Recorder::new(|_| true);
        let outcome = Optimizer::new(&recorder)
            .hardware(2)
            .optimize(&problem, 4)
            .unwrap();
        assert!(outcome.pool.is_empty());
        assert_eq!(outcome.failures, 2);
    }

    #[test]
    fn panics_are_isolated() {
        struct Panicky;
        impl Clusterer for Panicky {
            fn kcluster(&self, problem: &Problem<'_>, npass: usize, _: u64) -> Result<Run> {
                if npass == 1 {
                    panic!("primitive fault");
                }
                Ok(Run::new(0.5, vec![0; problem.rows()]))
            }
        }
        let ref prepared = prepared();
        let problem = Problem::new(2, prepared);
        let outcome = Optimizer::new(&Panicky)
            .hardware(2)
            .optimize(&problem, 3)
            .unwrap();
        assert_eq!(outcome.failures, 1);
        assert_eq!(outcome.pool.len(), 1);
    }

    #[test]
    fn zero_passes_rejected() {
        let ref prepared = prepared();
        let problem = Problem::new(2, prepared);
        let err = Optimizer::new(&KCluster).optimize(&problem, 0).unwrap_err();
        assert_eq!(err, ClusterError::Passes);
    }

    #[test]
    fn seeded_runs_reproduce() {
        let ref prepared = prepared();
        let problem = Problem::new(3, prepared);
        let optimizer = Optimizer::new(&KCluster).hardware(2).seed(Some(9));
        let a = optimizer.optimize(&problem, 6).unwrap().pool.into_inner();
        let b = optimizer.optimize(&problem, 6).unwrap().pool.into_inner();
        assert_eq!(a, b);
    }
}
