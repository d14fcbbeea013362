use super::*;
use crate::ClusterError;
use crate::Energy;
use crate::Label;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

/// One stored column: per time step values and undefined flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Column {
    Real {
        name: String,
        values: Vec<Vec<Energy>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        undefined: Vec<Vec<bool>>,
    },
    Integer {
        name: String,
        values: Vec<Vec<Label>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        undefined: Vec<Vec<bool>>,
        #[serde(default = "Column::length")]
        length: usize,
        #[serde(default)]
        decimals: usize,
    },
}

impl Column {
    fn length() -> usize {
        crate::DEFAULT_INTEGER_LENGTH
    }

    pub fn real(name: impl Into<String>, values: Vec<Energy>) -> Self {
        Self::Real {
            name: name.into(),
            values: vec![values],
            undefined: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Real { name, .. } | Self::Integer { name, .. } => name,
        }
    }
    pub fn kind(&self) -> Kind {
        match self {
            Self::Real { .. } => Kind::Real,
            Self::Integer { .. } => Kind::Integer,
        }
    }
    pub fn steps(&self) -> usize {
        match self {
            Self::Real { values, .. } => values.len(),
            Self::Integer { values, .. } => values.len(),
        }
    }
    pub fn values(&self, time: usize) -> Option<Vec<Energy>> {
        match self {
            Self::Real { values, .. } => values.get(time).cloned(),
            Self::Integer { values, .. } => values
                .get(time)
                .map(|step| step.iter().map(|&v| v as Energy).collect()),
        }
    }
    pub fn labels(&self, time: usize) -> Option<&[Label]> {
        match self {
            Self::Integer { values, .. } => values.get(time).map(Vec::as_slice),
            Self::Real { .. } => None,
        }
    }
    pub fn undefined(&self, time: usize) -> Option<&[bool]> {
        match self {
            Self::Real { undefined, .. } | Self::Integer { undefined, .. } => {
                undefined.get(time).map(Vec::as_slice)
            }
        }
    }
}

/// In-memory columnar dataset with optional per-observation centroids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    times: Vec<String>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    centroids: Option<Vec<(Energy, Energy)>>,
}

impl Table {
    pub fn with_times(mut self, times: Vec<String>) -> Self {
        self.times = times;
        self
    }
    pub fn with_centroids(mut self, centroids: Vec<(Energy, Energy)>) -> Self {
        self.centroids = Some(centroids);
        self
    }
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.find(name).map(|id| &self.columns[id])
    }

    fn step(&self, column: ColumnId, time: usize, len: usize) -> Result<()> {
        if column >= self.columns.len() {
            return Err(ClusterError::Shape(format!("no column at {}", column)));
        }
        if time >= self.columns[column].steps() {
            return Err(ClusterError::Shape(format!(
                "{} has no time step {}",
                self.columns[column].name(),
                time
            )));
        }
        if len != self.rows() {
            return Err(ClusterError::Shape(format!(
                "{} values for {} rows",
                len,
                self.rows()
            )));
        }
        Ok(())
    }
}

impl Storage for Table {
    fn rows(&self) -> usize {
        self.columns
            .first()
            .and_then(|c| c.values(0))
            .map(|v| v.len())
            .or_else(|| self.centroids.as_ref().map(Vec::len))
            .unwrap_or(0)
    }
    fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }
    fn times(&self) -> Vec<String> {
        self.times.clone()
    }
    fn find(&self, name: &str) -> Option<ColumnId> {
        self.columns.iter().position(|c| c.name() == name)
    }
    fn kind(&self, column: ColumnId) -> Kind {
        self.columns[column].kind()
    }
    fn steps(&self, column: ColumnId) -> usize {
        self.columns[column].steps()
    }
    fn values(&self, column: ColumnId, time: usize) -> Option<Vec<Energy>> {
        self.columns.get(column)?.values(time)
    }

    fn insert(&mut self, spec: ColumnSpec) -> Result<ColumnId> {
        if self.find(&spec.name).is_some() {
            return Err(ClusterError::Shape(format!("{} already exists", spec.name)));
        }
        let rows = self.rows();
        let steps = spec.steps.max(1);
        let column = match spec.kind {
            Kind::Real => Column::Real {
                name: spec.name,
                values: vec![vec![0.; rows]; steps],
                undefined: vec![vec![true; rows]; steps],
            },
            Kind::Integer => Column::Integer {
                name: spec.name,
                values: vec![vec![0; rows]; steps],
                undefined: vec![vec![true; rows]; steps],
                length: spec.length,
                decimals: spec.decimals,
            },
        };
        let position = spec.position.min(self.columns.len());
        self.columns.insert(position, column);
        Ok(position)
    }

    fn write(&mut self, column: ColumnId, time: usize, labels: &[Label]) -> Result<()> {
        self.step(column, time, labels.len())?;
        match &mut self.columns[column] {
            Column::Integer { values, .. } => {
                values[time].copy_from_slice(labels);
                Ok(())
            }
            Column::Real { name, .. } => Err(ClusterError::FieldType(name.clone())),
        }
    }

    fn undefine(&mut self, column: ColumnId, time: usize, flags: &[bool]) -> Result<()> {
        self.step(column, time, flags.len())?;
        let rows = self.rows();
        let steps = self.columns[column].steps();
        match &mut self.columns[column] {
            Column::Real { undefined, .. } | Column::Integer { undefined, .. } => {
                undefined.resize(steps, vec![false; rows]);
                undefined[time].copy_from_slice(flags);
                Ok(())
            }
        }
    }
}

impl Geometry for Table {
    fn centroids(&self) -> Option<Vec<(Energy, Energy)>> {
        self.centroids.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::default()
            .with_times(vec!["2000".into(), "2010".into()])
            .with_column(Column::real("area", vec![1., 2., 3.]))
            .with_column(Column::Real {
                name: "pop".into(),
                values: vec![vec![10., 20., 30.], vec![11., 21., 31.]],
                undefined: Vec::new(),
            })
    }

    #[test]
    fn catalogue_expands_time_steps() {
        let labels = table()
            .variables()
            .into_iter()
            .map(|v| v.label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["area", "pop (2000)", "pop (2010)"]);
    }

    #[test]
    fn select_resolves_in_order() {
        let series = table()
            .select(&["pop (2010)".into(), "area".into()])
            .unwrap();
        assert_eq!(series[0].values(), &[11., 21., 31.]);
        assert_eq!(series[0].time(), 1);
        assert_eq!(series[1].values(), &[1., 2., 3.]);
    }

    #[test]
    fn select_unknown_variable() {
        let err = table().select(&["income".into()]).unwrap_err();
        assert_eq!(err, ClusterError::UnknownVariable("income".into()));
    }

    #[test]
    fn insert_then_write() {
        let ref mut table = table();
        let id = table.insert(ColumnSpec::integer("CL", 2)).unwrap();
        assert_eq!(id, 2);
        assert_eq!(table.kind(id), Kind::Integer);
        table.write(id, 0, &[1, 2, 1]).unwrap();
        table.undefine(id, 0, &[false; 3]).unwrap();
        let column = table.column("CL").unwrap();
        assert_eq!(column.labels(0), Some(&[1, 2, 1][..]));
        assert_eq!(column.undefined(0), Some(&[false; 3][..]));
        assert_eq!(table.range(id, 0), Some((1., 2.)));
    }

    #[test]
    fn write_rejects_real_column() {
        let ref mut table = table();
        let err = table.write(0, 0, &[1, 1, 1]).unwrap_err();
        assert_eq!(err, ClusterError::FieldType("area".into()));
    }

    #[test]
    fn write_rejects_wrong_length() {
        let ref mut table = table();
        let id = table.insert(ColumnSpec::integer("CL", 0)).unwrap();
        assert!(matches!(table.write(id, 0, &[1]), Err(ClusterError::Shape(_))));
    }

    #[test]
    fn reads_json_dataset() {
        let json = r#"{
            "columns": [
                { "kind": "real", "name": "x", "values": [[1.0, 2.0]] },
                { "kind": "integer", "name": "CL", "values": [[1, 2]] }
            ],
            "centroids": [[0.0, 0.0], [1.0, 1.0]]
        }"#;
        let table = serde_json::from_str::<Table>(json).unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.kind(1), Kind::Integer);
        assert!(table.has_geometry());
        assert_eq!(table.count(), 2);
    }
}
