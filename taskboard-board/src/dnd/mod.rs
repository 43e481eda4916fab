//! Drag and drop: payload types, drop resolution and the drop monitor

mod data;
mod event;
mod monitor;
mod resolver;

pub use data::{ColumnDragData, ColumnDropZoneData, DragData, Edge, TaskDragData, TaskDropData};
pub use event::{DragLocation, DragSource, DropEvent, DropLocation, DropTarget};
pub use monitor::{BoardDropHandler, DropMonitor, Subscription};
pub use resolver::{ColumnMove, DropResolver, MoveCommand, MoveHandler, TaskMove};
