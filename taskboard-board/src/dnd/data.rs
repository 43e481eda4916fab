//! Drag and drop data bags.
//!
//! Every draggable element and drop target attaches a small JSON bag tagged by
//! a `type` field. Bags decode into [`DragData`]; anything that does not match
//! a known shape becomes [`DragData::Unknown`] and is ignored by the resolver.
//! Only the tag, ids and column ids decide the shape; the informational
//! fields (`name`, `shortId`, `position`, `closestEdge`) fall back to empty
//! values when they hold something unexpected.

use crate::types::{ColumnId, Position, TaskId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::trace;

/// Hit-testing result: which edge of the drop target the pointer was nearest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Parse an edge name; unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// A task card being dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDragData {
    pub id: TaskId,
    /// Column the task is being dragged out of
    pub column_id: ColumnId,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub short_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Position>,
}

/// A column, either being dragged or acting as a drop target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDragData {
    pub id: ColumnId,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Position>,
    #[serde(
        default,
        deserialize_with = "lenient_edge",
        skip_serializing_if = "Option::is_none"
    )]
    pub closest_edge: Option<Edge>,
}

/// The empty area at the bottom of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDropZoneData {
    pub column_id: ColumnId,
}

/// A task row acting as a drop target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDropData {
    pub id: TaskId,
    pub column_id: ColumnId,
    #[serde(
        default,
        deserialize_with = "lenient_edge",
        skip_serializing_if = "Option::is_none"
    )]
    pub closest_edge: Option<Edge>,
}

/// Tagged union of every data bag the board attaches to drag sources and drop targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DragData {
    #[serde(rename = "task")]
    Task(TaskDragData),
    #[serde(rename = "column")]
    Column(ColumnDragData),
    #[serde(rename = "column-drop-zone")]
    ColumnDropZone(ColumnDropZoneData),
    #[serde(rename = "task-drop")]
    TaskDrop(TaskDropData),
    /// Any bag with an unrecognized tag or missing required fields
    #[serde(other)]
    Unknown,
}

impl DragData {
    /// Decode a raw data bag, falling back to [`DragData::Unknown`] on any mismatch
    pub fn decode(value: &Value) -> Self {
        match Self::deserialize(value) {
            Ok(data) => data,
            Err(e) => {
                trace!(error = %e, "unrecognized drag data");
                Self::Unknown
            }
        }
    }

    /// Discriminant as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Task(_) => "task",
            Self::Column(_) => "column",
            Self::ColumnDropZone(_) => "column-drop-zone",
            Self::TaskDrop(_) => "task-drop",
            Self::Unknown => "unknown",
        }
    }
}

/// Deserialize a data bag without ever failing the enclosing payload
pub(crate) fn lenient_data<'de, D>(deserializer: D) -> Result<DragData, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(DragData::decode(&value))
}

fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt(deserializer)?.unwrap_or_default())
}

fn lenient_edge<'de, D>(deserializer: D) -> Result<Option<Edge>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(Edge::parse))
}
