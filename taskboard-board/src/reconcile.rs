//! Optimistic reconciliation of resolved moves into the local board snapshot.
//!
//! The server stays authoritative: these edits only keep the local copy in
//! step until the next refetch replaces it.

use crate::dnd::{ColumnMove, MoveCommand, MoveHandler, TaskMove};
use crate::error::{BoardError, Result};
use crate::types::BoardSnapshot;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

impl BoardSnapshot {
    /// Apply a task move.
    ///
    /// Cross-column moves take the task out of its previous column and append
    /// it to the target with the new position; same-column moves only update
    /// the position. On error the snapshot is unchanged.
    pub fn apply_task_move(&mut self, mv: &TaskMove) -> Result<()> {
        let from = self
            .column_index(&mv.previous_column_id)
            .ok_or_else(|| BoardError::column_not_found(mv.previous_column_id.as_str()))?;
        let task_index = self.columns[from]
            .tasks
            .iter()
            .position(|t| t.id == mv.task_id)
            .ok_or_else(|| BoardError::task_not_found(mv.task_id.as_str()))?;

        if mv.is_cross_column() {
            let to = self
                .column_index(&mv.column_id)
                .ok_or_else(|| BoardError::column_not_found(mv.column_id.as_str()))?;

            let mut task = self.columns[from].tasks.remove(task_index);
            task.position = mv.position;
            task.column_id = mv.column_id.clone();
            self.columns[to].tasks.push(task);
        } else {
            self.columns[from].tasks[task_index].position = mv.position;
        }

        debug!(
            task = %mv.task_id,
            column = %mv.column_id,
            position = %mv.position,
            "applied task move"
        );
        Ok(())
    }

    /// Apply a column move
    pub fn apply_column_move(&mut self, mv: &ColumnMove) -> Result<()> {
        let index = self
            .column_index(&mv.column_id)
            .ok_or_else(|| BoardError::column_not_found(mv.column_id.as_str()))?;
        self.columns[index].position = mv.position;

        debug!(column = %mv.column_id, position = %mv.position, "applied column move");
        Ok(())
    }

    /// Apply either kind of move
    pub fn apply(&mut self, command: &MoveCommand) -> Result<()> {
        match command {
            MoveCommand::Task(mv) => self.apply_task_move(mv),
            MoveCommand::Column(mv) => self.apply_column_move(mv),
        }
    }
}

/// Applies each move to a shared snapshot before forwarding it to the inner
/// handler, so the board reflects a drop before the server answers.
#[derive(Debug)]
pub struct OptimisticHandler<H> {
    board: Arc<RwLock<BoardSnapshot>>,
    inner: H,
}

impl<H: MoveHandler> OptimisticHandler<H> {
    pub fn new(board: Arc<RwLock<BoardSnapshot>>, inner: H) -> Self {
        Self { board, inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }

    fn apply(&self, command: &MoveCommand) {
        let mut board = self.board.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = board.apply(command) {
            // The mutation still goes out; the refetch will correct the snapshot.
            warn!(error = %e, "optimistic update skipped");
        }
    }
}

impl<H: MoveHandler> MoveHandler for OptimisticHandler<H> {
    fn on_task_move(&mut self, mv: TaskMove) {
        let command = MoveCommand::Task(mv);
        self.apply(&command);
        self.inner.handle(command);
    }

    fn on_column_move(&mut self, mv: ColumnMove) {
        let command = MoveCommand::Column(mv);
        self.apply(&command);
        self.inner.handle(command);
    }
}
