//! Drop resolution: turn a finished drag gesture into a move command.
//!
//! Resolution is a single synchronous pass over the current board. Every
//! failure (unknown destination, stale column or task, unsupported
//! source/destination pair) aborts without a command; the user can simply
//! drag again.

use super::data::{ColumnDragData, DragData, Edge, TaskDragData};
use super::event::DropEvent;
use crate::error::Result;
use crate::types::{BoardSnapshot, Column, ColumnId, Orderable, Position, PositionAllocator, TaskId};
use serde::{Deserialize, Serialize};
use taskboard_config::{BoardConfig, DEFAULT_MIN_GAP};
use tracing::{debug, trace, warn};

/// Move a task to a position in a (possibly different) column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMove {
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    /// Destination column
    #[serde(rename = "taskGroupID")]
    pub column_id: ColumnId,
    pub position: Position,
    /// Column the task was dragged out of
    #[serde(rename = "previousTaskGroupID")]
    pub previous_column_id: ColumnId,
}

impl TaskMove {
    /// Whether the task changes column
    pub fn is_cross_column(&self) -> bool {
        self.column_id != self.previous_column_id
    }
}

/// Move a column to a new position on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMove {
    #[serde(rename = "taskGroupID")]
    pub column_id: ColumnId,
    pub position: Position,
}

/// Outcome of a successful drop resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveCommand {
    Task(TaskMove),
    Column(ColumnMove),
}

impl MoveCommand {
    /// Serialize the command's variables for the mutation layer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Receiver of resolved moves, typically the layer that sends mutations to the server
pub trait MoveHandler {
    fn on_task_move(&mut self, mv: TaskMove);

    fn on_column_move(&mut self, mv: ColumnMove);

    /// Route a command to the matching callback
    fn handle(&mut self, command: MoveCommand) {
        match command {
            MoveCommand::Task(mv) => self.on_task_move(mv),
            MoveCommand::Column(mv) => self.on_column_move(mv),
        }
    }
}

/// Collects commands in arrival order
impl MoveHandler for Vec<MoveCommand> {
    fn on_task_move(&mut self, mv: TaskMove) {
        self.push(MoveCommand::Task(mv));
    }

    fn on_column_move(&mut self, mv: ColumnMove) {
        self.push(MoveCommand::Column(mv));
    }
}

/// Resolves drop events against the columns of a board
#[derive(Debug, Clone)]
pub struct DropResolver<'a> {
    columns: &'a [Column],
    allocator: PositionAllocator,
    min_gap: f64,
}

impl<'a> DropResolver<'a> {
    pub fn new(columns: &'a [Column]) -> Self {
        Self {
            columns,
            allocator: PositionAllocator::default(),
            min_gap: DEFAULT_MIN_GAP,
        }
    }

    pub fn for_board(board: &'a BoardSnapshot) -> Self {
        Self::new(&board.columns)
    }

    /// Take the seed position and degenerate-gap threshold from configuration
    pub fn with_config(mut self, config: &BoardConfig) -> Self {
        self.allocator = PositionAllocator::from_config(config);
        self.min_gap = config.min_gap;
        self
    }

    pub fn with_allocator(mut self, allocator: PositionAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Resolve an event to a move, or `None` when the drop has no effect
    pub fn resolve(&self, event: &DropEvent) -> Option<MoveCommand> {
        let Some(destination) = event.destination() else {
            debug!("drop ignored: no drop target under pointer");
            return None;
        };

        let command = match &event.source.data {
            DragData::Task(source) => self.resolve_task(source, destination).map(MoveCommand::Task),
            DragData::Column(source) => {
                self.resolve_column(source, destination).map(MoveCommand::Column)
            }
            other => {
                debug!(source = other.kind(), "drop ignored: source is not draggable");
                None
            }
        };

        if let Some(ref command) = command {
            debug!(?command, "drop resolved");
        }
        command
    }

    /// Resolve an event and pass the resulting move to `handler`.
    ///
    /// Returns whether a callback was invoked.
    pub fn dispatch<H: MoveHandler + ?Sized>(&self, event: &DropEvent, handler: &mut H) -> bool {
        match self.resolve(event) {
            Some(command) => {
                handler.handle(command);
                true
            }
            None => false,
        }
    }

    fn resolve_task(&self, source: &TaskDragData, destination: &DragData) -> Option<TaskMove> {
        let (column, position) = match destination {
            DragData::TaskDrop(target) => {
                let column = self.find_column(&target.column_id)?;
                let tasks = column.sorted_tasks();
                let Some(index) = tasks.iter().position(|t| t.id == target.id) else {
                    debug!(
                        task = %target.id,
                        column = %column.id,
                        "drop ignored: target task not in column"
                    );
                    return None;
                };
                let leading = target.closest_edge == Some(Edge::Top);
                let (before, after) = neighbors(&tasks, index, leading);
                (column, self.allocate(before, after))
            }
            DragData::ColumnDropZone(zone) => {
                let column = self.find_column(&zone.column_id)?;
                let tasks = column.sorted_tasks();
                (column, self.allocate(tasks.last().copied(), None))
            }
            other => {
                debug!(destination = other.kind(), "drop ignored: task cannot land here");
                return None;
            }
        };

        Some(TaskMove {
            task_id: source.id.clone(),
            column_id: column.id.clone(),
            position,
            previous_column_id: source.column_id.clone(),
        })
    }

    fn resolve_column(
        &self,
        source: &ColumnDragData,
        destination: &DragData,
    ) -> Option<ColumnMove> {
        let DragData::Column(target) = destination else {
            debug!(destination = destination.kind(), "drop ignored: column cannot land here");
            return None;
        };

        let columns = crate::types::sorted(self.columns);
        let Some(index) = columns.iter().position(|c| c.id == target.id) else {
            debug!(column = %target.id, "drop ignored: target column not on board");
            return None;
        };

        let leading = target.closest_edge == Some(Edge::Left);
        let (before, after) = neighbors(&columns, index, leading);

        Some(ColumnMove {
            column_id: source.id.clone(),
            position: self.allocate(before, after),
        })
    }

    fn find_column(&self, id: &ColumnId) -> Option<&'a Column> {
        let column = self.columns.iter().find(|c| &c.id == id);
        if column.is_none() {
            debug!(column = %id, "drop ignored: column not on board");
        }
        column
    }

    fn allocate<T: Orderable>(&self, before: Option<&T>, after: Option<&T>) -> Position {
        let position = self.allocator.allocate(before, after);
        trace!(
            before = before.map(|b| b.position().value()),
            after = after.map(|a| a.position().value()),
            %position,
            "allocated position"
        );

        let cramped = before
            .into_iter()
            .chain(after)
            .any(|n| position.distance(n.position()) < self.min_gap);
        if cramped {
            warn!(
                %position,
                min_gap = self.min_gap,
                "allocated position is within min_gap of a neighbor; consider rebalancing"
            );
        }
        position
    }
}

/// Neighbor pair around `index`. A leading edge inserts before the target,
/// anything else inserts after it.
fn neighbors<'s, T>(list: &[&'s T], index: usize, leading: bool) -> (Option<&'s T>, Option<&'s T>) {
    if leading {
        let before = index.checked_sub(1).and_then(|i| list.get(i)).copied();
        (before, list.get(index).copied())
    } else {
        (list.get(index).copied(), list.get(index + 1).copied())
    }
}
