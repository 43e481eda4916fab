//! Drop event payload

use super::data::{lenient_data, DragData};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSource {
    #[serde(deserialize_with = "lenient_data")]
    pub data: DragData,
}

/// One element under the pointer when the drag ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTarget {
    #[serde(deserialize_with = "lenient_data")]
    pub data: DragData,
}

/// Drop targets under the pointer, innermost first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropLocation {
    #[serde(default)]
    pub drop_targets: Vec<DropTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragLocation {
    #[serde(default)]
    pub current: DropLocation,
}

/// A completed drag gesture:
/// `{ source: { data }, location: { current: { dropTargets: [{ data }] } } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    pub source: DragSource,
    #[serde(default)]
    pub location: DragLocation,
}

impl DropEvent {
    /// Build an event from a source bag and the targets under the pointer, innermost first
    pub fn new(source: DragData, targets: impl IntoIterator<Item = DragData>) -> Self {
        Self {
            source: DragSource { data: source },
            location: DragLocation {
                current: DropLocation {
                    drop_targets: targets.into_iter().map(|data| DropTarget { data }).collect(),
                },
            },
        }
    }

    /// Parse an event from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoardError::invalid_payload(e.to_string()))
    }

    /// Parse an event from an already decoded JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| BoardError::invalid_payload(e.to_string()))
    }

    /// The innermost drop target, if the drag ended over one
    pub fn destination(&self) -> Option<&DragData> {
        self.location
            .current
            .drop_targets
            .first()
            .map(|target| &target.data)
    }
}
