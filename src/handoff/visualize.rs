use super::*;
use crate::Energy;

/// How map categories are derived from the field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    #[default]
    UniqueValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Smoothing {
    #[default]
    None,
}

/// A request to display a thematic map of one integer field.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    pub field: String,
    pub column: ColumnId,
    pub time: usize,
    pub range: Option<(Energy, Energy)>,
    pub classification: Classification,
    pub smoothing: Smoothing,
}

impl MapRequest {
    /// Unique-values map of a freshly written cluster field.
    pub fn clusters(field: impl Into<String>, column: ColumnId, range: Option<(Energy, Energy)>) -> Self {
        Self {
            field: field.into(),
            column,
            time: 0,
            range,
            classification: Classification::UniqueValues,
            smoothing: Smoothing::None,
        }
    }
}

/// Visualization collaborator.
pub trait Visualizer {
    fn show(&mut self, request: MapRequest);
}

/// Records map requests as log lines, for headless runs.
#[derive(Debug, Default)]
pub struct LogVisualizer {
    shown: Vec<MapRequest>,
}

impl LogVisualizer {
    pub fn shown(&self) -> &[MapRequest] {
        &self.shown
    }
}

impl Visualizer for LogVisualizer {
    fn show(&mut self, request: MapRequest) {
        log::info!(
            "{:<32}{:<32}",
            "cluster map",
            format!("{} {:?}", request.field, request.range)
        );
        self.shown.push(request);
    }
}
