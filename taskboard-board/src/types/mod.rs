//! Core types for the board engine

mod board;
mod ids;
mod position;

pub use board::{BoardSnapshot, BoardTask, Column};
pub use ids::{ColumnId, LabelId, MemberId, TaskId};
pub use position::{allocate, sorted, Draggable, Orderable, Position, PositionAllocator};
