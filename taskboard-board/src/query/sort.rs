//! Task sorting modes

use crate::types::BoardTask;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    /// Manual order, by position
    #[default]
    None,
    DueDate,
    Name,
    Members,
    Labels,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSorting {
    pub kind: SortKind,
    pub direction: SortDirection,
}

impl TaskSorting {
    pub fn new(kind: SortKind, direction: SortDirection) -> Self {
        Self { kind, direction }
    }

    /// Dragging tasks only makes sense while the column shows manual order
    pub fn allows_manual_reorder(&self) -> bool {
        self.kind == SortKind::None
    }

    /// In-place sort of a filtered task list; ties keep position order
    pub fn sort(&self, tasks: &mut [&BoardTask]) {
        tasks.sort_by(|a, b| a.position.total_cmp(&b.position));

        let directed = |ord: Ordering| match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };

        match self.kind {
            SortKind::None => {}
            // Undated tasks stay last in both directions
            SortKind::DueDate => tasks.sort_by(|a, b| match (&a.due_date, &b.due_date) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => directed(x.cmp(y)),
            }),
            SortKind::Name => tasks.sort_by(|a, b| {
                directed(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
            SortKind::Members => {
                tasks.sort_by(|a, b| directed(b.assigned.len().cmp(&a.assigned.len())))
            }
            SortKind::Labels => tasks.sort_by(|a, b| directed(b.labels.len().cmp(&a.labels.len()))),
            SortKind::Complete => tasks.sort_by(|a, b| directed(b.complete.cmp(&a.complete))),
        }
    }
}
