//! Board-level types: the client's snapshot of columns and their tasks

use super::ids::{ColumnId, LabelId, MemberId, TaskId};
use super::position::{sorted, Orderable, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task card as held in the board snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTask {
    pub id: TaskId,
    pub name: String,
    pub position: Position,
    /// Column the task currently belongs to
    pub column_id: ColumnId,
    #[serde(default)]
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Members assigned to this task
    #[serde(default)]
    pub assigned: Vec<MemberId>,
    /// Project labels attached to this task
    #[serde(default)]
    pub labels: Vec<LabelId>,
}

impl BoardTask {
    /// Create an open task with no due date, assignees or labels
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        column_id: impl Into<ColumnId>,
        position: impl Into<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            column_id: column_id.into(),
            complete: false,
            completed_at: None,
            due_date: None,
            assigned: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Mark the task complete at the given time
    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.complete = true;
        self.completed_at = Some(at);
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_assignee(mut self, member: impl Into<MemberId>) -> Self {
        self.assigned.push(member.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<LabelId>) -> Self {
        self.labels.push(label.into());
        self
    }
}

impl Orderable for BoardTask {
    type Id = TaskId;

    fn id(&self) -> &TaskId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// A column (task group) of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub tasks: Vec<BoardTask>,
}

impl Column {
    pub fn new(
        id: impl Into<ColumnId>,
        name: impl Into<String>,
        position: impl Into<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            tasks: Vec::new(),
        }
    }

    /// Add a task, rewriting its column to this one
    pub fn with_task(mut self, mut task: BoardTask) -> Self {
        task.column_id = self.id.clone();
        self.tasks.push(task);
        self
    }

    /// Tasks in display order
    pub fn sorted_tasks(&self) -> Vec<&BoardTask> {
        sorted(&self.tasks)
    }

    /// Find a task in this column by ID
    pub fn find_task(&self, id: &TaskId) -> Option<&BoardTask> {
        self.tasks.iter().find(|t| &t.id == id)
    }
}

impl Orderable for Column {
    type Id = ColumnId;

    fn id(&self) -> &ColumnId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Transient client copy of a board's columns.
///
/// The remote store owns the authoritative data; this copy is refreshed from
/// it and patched optimistically by the move reconciliation in
/// [`crate::reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
}

impl BoardSnapshot {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Find a column by ID
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub(crate) fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Columns in display order
    pub fn sorted_columns(&self) -> Vec<&Column> {
        sorted(&self.columns)
    }

    /// Find a task anywhere on the board
    pub fn find_task(&self, id: &TaskId) -> Option<&BoardTask> {
        self.columns.iter().find_map(|c| c.find_task(id))
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardSnapshot {
        BoardSnapshot::new(vec![
            Column::new("doing", "Doing", 200.0)
                .with_task(BoardTask::new("t3", "Third", "doing", 5.0)),
            Column::new("todo", "To Do", 100.0)
                .with_task(BoardTask::new("t1", "First", "todo", 20.0))
                .with_task(BoardTask::new("t2", "Second", "todo", 10.0)),
        ])
    }

    #[test]
    fn test_sorted_columns() {
        let board = board();
        let ids: Vec<&str> = board.sorted_columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "doing"]);
    }

    #[test]
    fn test_sorted_tasks() {
        let board = board();
        let todo = board.column(&ColumnId::from("todo")).unwrap();
        let ids: Vec<&str> = todo.sorted_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[test]
    fn test_with_task_rewrites_column() {
        let column =
            Column::new("done", "Done", 1.0).with_task(BoardTask::new("t", "T", "todo", 1.0));
        assert_eq!(column.tasks[0].column_id.as_str(), "done");
    }

    #[test]
    fn test_find_task_and_count() {
        let board = board();
        assert_eq!(board.task_count(), 3);
        assert_eq!(board.find_task(&TaskId::from("t3")).unwrap().name, "Third");
        assert!(board.find_task(&TaskId::from("missing")).is_none());
    }

    #[test]
    fn test_task_deserializes_from_camel_case() {
        let json = r#"{
            "id": "t1",
            "name": "Write docs",
            "position": 1024.5,
            "columnId": "todo",
            "dueDate": "2026-10-20T09:00:00Z",
            "assigned": ["m1"]
        }"#;
        let task: BoardTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.column_id.as_str(), "todo");
        assert_eq!(task.position.value(), 1024.5);
        assert!(!task.complete);
        assert!(task.due_date.is_some());
        assert_eq!(task.assigned, vec![MemberId::from("m1")]);
    }
}
