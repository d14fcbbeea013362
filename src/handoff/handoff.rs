use super::*;
use crate::ClusterError;
use crate::Labeling;
use crate::Result;

/// Writes a labeling into a named integer field and asks for a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    field: String,
}

impl Handoff {
    pub fn new(field: impl Into<String>) -> Result<Self> {
        let field = field.into();
        match field.trim().is_empty() {
            true => Err(ClusterError::EmptyField),
            false => Ok(Self { field }),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// An existing field must be an integer column. Leaves storage untouched.
    pub fn check<S>(&self, storage: &S) -> Result<Option<ColumnId>>
    where
        S: Storage,
    {
        match storage.find(&self.field) {
            None => Ok(None),
            Some(id) if storage.kind(id) == Kind::Integer => Ok(Some(id)),
            Some(_) => Err(ClusterError::FieldType(self.field.clone())),
        }
    }

    /// Create or overwrite the field with the labels at time 0, then
    /// request a map when a visualizer is attached and the dataset has
    /// geometry.
    pub fn deliver<S>(
        &self,
        storage: &mut S,
        labeling: &Labeling,
        visualizer: Option<&mut dyn Visualizer>,
    ) -> Result<ColumnId>
    where
        S: Storage + Geometry,
    {
        if labeling.len() != storage.rows() {
            return Err(ClusterError::Shape(format!(
                "{} labels for {} rows",
                labeling.len(),
                storage.rows()
            )));
        }
        let column = match self.check(storage)? {
            Some(id) => id,
            None => {
                let position = storage.count();
                storage.insert(ColumnSpec::integer(self.field.clone(), position))?
            }
        };
        storage.write(column, 0, &labeling.labels())?;
        storage.undefine(column, 0, &labeling.undefined())?;
        log::info!("{:<32}{:<32}", "labels written", self.field);
        if let Some(visualizer) = visualizer {
            if storage.has_geometry() {
                let range = storage.range(column, 0);
                visualizer.show(MapRequest::clusters(self.field.clone(), column, range));
            }
        }
        Ok(column)
    }
}
