//! Board ordering engine for taskboard clients
//!
//! Columns and tasks are ordered by a floating-point `position`. Moving an
//! item picks a new position between its future neighbors, so a drop only
//! ever rewrites the moved item.
//!
//! ## Overview
//!
//! - **Fractional positions** - [`PositionAllocator`] computes the position for a slot
//! - **Drop resolution** - [`DropResolver`] turns a drag gesture into a [`MoveCommand`]
//! - **Drop monitor** - [`DropMonitor`] delivers drop events until a [`Subscription`] is dropped
//! - **Reconciliation** - [`OptimisticHandler`] patches the local snapshot before forwarding
//! - **Rebalancing** - [`needs_rebalance`] and [`plan_rebalance`] respace positions on request
//! - **Task views** - [`TaskQuery`] filters and sorts a column's tasks
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard_board::{BoardSnapshot, BoardTask, Column, DropEvent, DropResolver, MoveCommand};
//!
//! let board = BoardSnapshot::new(vec![
//!     Column::new("todo", "To Do", 1.0)
//!         .with_task(BoardTask::new("t1", "Write docs", "todo", 10.0))
//!         .with_task(BoardTask::new("t2", "Ship", "todo", 20.0)),
//! ]);
//!
//! let event = DropEvent::from_json(r#"{
//!     "source": { "data": { "type": "task", "id": "t2", "columnId": "todo", "name": "Ship" } },
//!     "location": { "current": { "dropTargets": [
//!         { "data": { "type": "task-drop", "id": "t1", "columnId": "todo",
//!                     "closestEdge": "top" } }
//!     ] } }
//! }"#)?;
//!
//! match DropResolver::for_board(&board).resolve(&event) {
//!     Some(MoveCommand::Task(mv)) => assert_eq!(mv.position.value(), 5.0),
//!     other => panic!("unexpected {other:?}"),
//! }
//! # Ok::<(), taskboard_board::BoardError>(())
//! ```

mod error;
pub mod dnd;
pub mod query;
pub mod rebalance;
pub mod reconcile;
pub mod types;

pub use error::{BoardError, Result};

pub use types::{
    allocate, sorted, BoardSnapshot, BoardTask, Column, ColumnId, Draggable, LabelId, MemberId,
    Orderable, Position, PositionAllocator, TaskId,
};

pub use dnd::{
    BoardDropHandler, ColumnDragData, ColumnDropZoneData, ColumnMove, DragData, DragLocation,
    DragSource, DropEvent, DropLocation, DropMonitor, DropResolver, DropTarget, Edge, MoveCommand,
    MoveHandler, Subscription, TaskDragData, TaskDropData, TaskMove,
};

pub use query::{
    CompletedSince, DueDateFilter, SortDirection, SortKind, StatusFilter, TaskFilters, TaskQuery,
    TaskSorting, TaskStatus,
};

pub use rebalance::{needs_rebalance, plan_rebalance};
pub use reconcile::OptimisticHandler;

pub use taskboard_config::{BoardConfig, WeekStart};
