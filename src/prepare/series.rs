use crate::Energy;

/// The values of one selected variable at one time step.
///
/// Each series becomes exactly one matrix column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    time: usize,
    values: Vec<Energy>,
}

impl Series {
    pub fn new(name: impl Into<String>, time: usize, values: Vec<Energy>) -> Self {
        Self {
            name: name.into(),
            time,
            values,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn time(&self) -> usize {
        self.time
    }
    pub fn values(&self) -> &[Energy] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn into_values(self) -> Vec<Energy> {
        self.values
    }
}

impl From<(&str, Vec<Energy>)> for Series {
    fn from((name, values): (&str, Vec<Energy>)) -> Self {
        Self::new(name, 0, values)
    }
}
