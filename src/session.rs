use crate::ClusterError;
use crate::Clusterer;
use crate::ColumnId;
use crate::Energy;
use crate::Fraction;
use crate::Geometry;
use crate::Handoff;
use crate::Labeling;
use crate::Optimizer;
use crate::Partition;
use crate::Preparer;
use crate::Problem;
use crate::Result;
use crate::Selection;
use crate::Series;
use crate::Settings;
use crate::Storage;
use crate::Visualizer;
use crate::Weighting;

/// What a completed session leaves behind besides the written field.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub labeling: Labeling,
    pub error: Energy,
    pub field: String,
    pub column: ColumnId,
    pub partitions: Vec<Partition>,
    pub failures: usize,
}

/// Validated inputs of one invocation.
struct Inputs {
    series: Vec<Series>,
    centroids: Option<(Vec<(Energy, Energy)>, Fraction)>,
    handoff: Handoff,
}

/// One clustering invocation over a storage collaborator.
///
/// Validates everything up front, then prepares the matrix, runs the
/// multi-start optimizer, selects and canonicalizes the best run, and hands
/// the labels back to storage. Nothing is written unless a run succeeds.
pub struct Session<'a, C>
where
    C: Clusterer,
{
    settings: &'a Settings,
    clusterer: &'a C,
}

impl<'a, C> Session<'a, C>
where
    C: Clusterer,
{
    pub fn new(settings: &'a Settings, clusterer: &'a C) -> Self {
        Self {
            settings,
            clusterer,
        }
    }

    pub fn run<S>(&self, storage: &mut S, visualizer: Option<&mut dyn Visualizer>) -> Result<Report>
    where
        S: Storage + Geometry,
    {
        let ref settings = self.settings;
        let Inputs {
            series,
            centroids,
            handoff,
        } = self.validate(storage)?;
        for s in series.iter() {
            let (lo, hi) = Self::range(s.values());
            log::info!("{:<32}{:<32}", s.name(), format!("min {} max {}", lo, hi));
        }
        let preparer = match centroids {
            Some((centroids, wc)) => Preparer::new(settings.transform).blend(centroids, wc)?,
            None => Preparer::new(settings.transform),
        };
        let ref prepared = preparer.prepare(series)?;
        let problem = Problem::new(settings.k, prepared)
            .maxiter(settings.maxiter)
            .method(settings.method)
            .metric(settings.metric)
            .min_size(settings.min_size);
        let optimizer = Optimizer::new(self.clusterer).seed(settings.seed);
        let optimizer = match settings.threads {
            Some(threads) => optimizer.hardware(threads),
            None => optimizer,
        };
        let outcome = optimizer.optimize(&problem, settings.npass)?;
        let selection = Selection::from_pool(outcome.pool, settings.k)?;
        let column = handoff.deliver(storage, &selection.labeling, visualizer)?;
        Ok(Report {
            labeling: selection.labeling,
            error: selection.error,
            field: handoff.field().to_string(),
            column,
            partitions: outcome.partitions,
            failures: outcome.failures,
        })
    }

    /// Every check that can fail before computation, in reporting order.
    fn validate<S>(&self, storage: &S) -> Result<Inputs>
    where
        S: Storage + Geometry,
    {
        let ref settings = self.settings;
        let n = storage.rows();
        let k = settings.k;
        let max = n.min(crate::MAX_CLUSTERS);
        if k < 2 || k > max {
            return Err(ClusterError::Clusters { k, max });
        }
        let bound = n / k;
        if settings.min_size > bound {
            return Err(ClusterError::MinimumSize {
                min_size: settings.min_size,
                bound,
            });
        }
        let wc = settings.blending();
        if wc.is_some() && !storage.has_geometry() {
            return Err(ClusterError::NoGeometry);
        }
        if wc.is_none() && settings.variables.len() < 2 {
            return Err(ClusterError::TooFewVariables(settings.variables.len()));
        }
        let handoff = Handoff::new(settings.field.clone())?;
        let series = storage.select(&settings.variables)?;
        handoff.check(storage)?;
        if settings.npass == 0 {
            return Err(ClusterError::Passes);
        }
        if settings.maxiter == 0 {
            return Err(ClusterError::Iterations);
        }
        Weighting::try_from_centroids(wc)?;
        let centroids = match wc {
            Some(wc) => Some((storage.centroids().ok_or(ClusterError::NoGeometry)?, wc)),
            None => None,
        };
        Ok(Inputs {
            series,
            centroids,
            handoff,
        })
    }

    fn range(values: &[Energy]) -> (Energy, Energy) {
        values
            .iter()
            .fold((Energy::INFINITY, Energy::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
