use crate::ClusterError;
use crate::Energy;
use crate::Label;
use crate::Result;
use crate::Series;
use serde::Deserialize;
use serde::Serialize;

/// Position of a column in its storage.
pub type ColumnId = usize;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Real,
    Integer,
}

/// Everything needed to create a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub kind: Kind,
    pub name: String,
    pub position: usize,
    pub steps: usize,
    pub length: usize,
    pub decimals: usize,
}

impl ColumnSpec {
    /// Single time step integer column appended after `position - 1`.
    pub fn integer(name: impl Into<String>, position: usize) -> Self {
        Self {
            kind: Kind::Integer,
            name: name.into(),
            position,
            steps: 1,
            length: crate::DEFAULT_INTEGER_LENGTH,
            decimals: crate::DEFAULT_INTEGER_DECIMALS,
        }
    }
}

/// One entry of the variable catalogue: a column at one time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// What the user selects, `name` or `name (time)` for time-variant columns.
    pub label: String,
    pub column: String,
    pub time: usize,
}

/// Columnar storage collaborator.
pub trait Storage {
    /// Observations per column.
    fn rows(&self) -> usize;
    /// Column names in position order.
    fn names(&self) -> Vec<String>;
    /// Labels of the dataset's time steps.
    fn times(&self) -> Vec<String>;
    fn find(&self, name: &str) -> Option<ColumnId>;
    fn kind(&self, column: ColumnId) -> Kind;
    /// Number of time steps stored in a column.
    fn steps(&self, column: ColumnId) -> usize;
    /// Column values at a time step, as reals.
    fn values(&self, column: ColumnId, time: usize) -> Option<Vec<Energy>>;
    fn insert(&mut self, spec: ColumnSpec) -> Result<ColumnId>;
    fn write(&mut self, column: ColumnId, time: usize, values: &[Label]) -> Result<()>;
    fn undefine(&mut self, column: ColumnId, time: usize, undefined: &[bool]) -> Result<()>;

    fn count(&self) -> usize {
        self.names().len()
    }

    /// Smallest and largest value of a column at a time step.
    fn range(&self, column: ColumnId, time: usize) -> Option<(Energy, Energy)> {
        self.values(column, time)?
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((Energy::min(lo, v), Energy::max(hi, v))),
            })
    }

    /// Selectable variables: one entry per numeric column, expanded into
    /// one entry per time step for time-variant columns.
    fn variables(&self) -> Vec<Variable> {
        let times = self.times();
        self.names()
            .into_iter()
            .enumerate()
            .flat_map(|(id, name)| match self.steps(id) {
                1 => vec![Variable {
                    label: name.clone(),
                    column: name,
                    time: 0,
                }],
                n => (0..n)
                    .map(|t| Variable {
                        label: format!(
                            "{} ({})",
                            name,
                            times.get(t).cloned().unwrap_or_else(|| t.to_string())
                        ),
                        column: name.clone(),
                        time: t,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Resolve catalogue labels to the series they name, in selection order.
    fn select(&self, labels: &[String]) -> Result<Vec<Series>> {
        let ref catalogue = self.variables();
        labels
            .iter()
            .map(|label| {
                catalogue
                    .iter()
                    .find(|v| &v.label == label)
                    .and_then(|v| {
                        let id = self.find(&v.column)?;
                        let values = self.values(id, v.time)?;
                        Some(Series::new(v.label.clone(), v.time, values))
                    })
                    .ok_or_else(|| ClusterError::UnknownVariable(label.clone()))
            })
            .collect()
    }
}

/// Geometry collaborator: one centroid per observation.
pub trait Geometry {
    fn centroids(&self) -> Option<Vec<(Energy, Energy)>>;

    fn has_geometry(&self) -> bool {
        self.centroids().is_some()
    }
}
