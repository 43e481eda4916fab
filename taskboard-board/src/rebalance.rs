//! Explicit renormalization of positions.
//!
//! Midpoint allocation halves the gap on every insert into the same slot, so
//! after enough drops two neighbors can end up with equal floats. Nothing here
//! runs on its own: callers check [`needs_rebalance`] (or use the
//! `*_if_needed` methods, which read `min_gap` and `rebalance_spacing` from a
//! [`BoardConfig`]) and send the planned moves like any other mutation.

use crate::dnd::{ColumnMove, TaskMove};
use crate::error::{BoardError, Result};
use crate::types::{sorted, BoardSnapshot, ColumnId, Orderable, Position};
use taskboard_config::BoardConfig;
use tracing::debug;

/// Evenly spaced positions (`spacing`, `2 * spacing`, ...) in current display order
pub fn plan_rebalance<T: Orderable>(items: &[T], spacing: f64) -> Vec<(&T::Id, Position)> {
    sorted(items)
        .into_iter()
        .enumerate()
        .map(|(k, item)| (item.id(), Position::new(spacing * (k + 1) as f64)))
        .collect()
}

/// Whether any neighbor pair (or the first item and zero) is closer than `min_gap`
pub fn needs_rebalance<T: Orderable>(items: &[T], min_gap: f64) -> bool {
    let view = sorted(items);
    let Some(first) = view.first() else {
        return false;
    };

    first.position().value().abs() < min_gap
        || view
            .windows(2)
            .any(|pair| pair[0].position().distance(pair[1].position()) < min_gap)
}

impl BoardSnapshot {
    /// Task moves that respace one column's tasks
    pub fn rebalance_column(&self, id: &ColumnId, spacing: f64) -> Result<Vec<TaskMove>> {
        let column = self
            .column(id)
            .ok_or_else(|| BoardError::column_not_found(id.as_str()))?;

        let moves: Vec<TaskMove> = plan_rebalance(&column.tasks, spacing)
            .into_iter()
            .map(|(task_id, position)| TaskMove {
                task_id: task_id.clone(),
                column_id: column.id.clone(),
                position,
                previous_column_id: column.id.clone(),
            })
            .collect();

        debug!(column = %id, moves = moves.len(), spacing, "planned column rebalance");
        Ok(moves)
    }

    /// Column moves that respace the board's columns
    pub fn rebalance_columns(&self, spacing: f64) -> Vec<ColumnMove> {
        plan_rebalance(&self.columns, spacing)
            .into_iter()
            .map(|(column_id, position)| ColumnMove {
                column_id: column_id.clone(),
                position,
            })
            .collect()
    }

    /// Respace one column's tasks with the configured spacing, but only when
    /// some gap fell under the configured `min_gap`; otherwise no moves
    pub fn rebalance_column_if_needed(
        &self,
        id: &ColumnId,
        config: &BoardConfig,
    ) -> Result<Vec<TaskMove>> {
        let column = self
            .column(id)
            .ok_or_else(|| BoardError::column_not_found(id.as_str()))?;

        if !needs_rebalance(&column.tasks, config.min_gap) {
            return Ok(Vec::new());
        }
        self.rebalance_column(id, config.rebalance_spacing)
    }

    /// Column counterpart of [`BoardSnapshot::rebalance_column_if_needed`]
    pub fn rebalance_columns_if_needed(&self, config: &BoardConfig) -> Vec<ColumnMove> {
        if !needs_rebalance(&self.columns, config.min_gap) {
            return Vec::new();
        }
        self.rebalance_columns(config.rebalance_spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardTask, Column, Draggable, PositionAllocator};

    #[test]
    fn test_plan_follows_display_order() {
        let items = vec![
            Draggable::new("b", 3.0),
            Draggable::new("a", 1.0),
            Draggable::new("c", 3.0),
        ];
        let plan = plan_rebalance(&items, 10.0);
        let expected: Vec<(&str, Position)> = vec![
            ("a", Position::new(10.0)),
            ("b", Position::new(20.0)),
            ("c", Position::new(30.0)),
        ];
        assert_eq!(plan, expected);
        assert_eq!(items[0].id, "b");
    }

    #[test]
    fn test_needs_rebalance_after_collapsed_gap() {
        let allocator = PositionAllocator::default();
        let mut items = vec![Draggable::new("first", Position::SEED)];
        assert!(!needs_rebalance(&items, 1e-9));

        let mut head = Position::SEED;
        for i in 0..80 {
            head = allocator.between(None, Some(head));
            items.push(Draggable::new(format!("t{i}"), head));
        }
        assert!(needs_rebalance(&items, 1e-9));
    }

    #[test]
    fn test_needs_rebalance_on_equal_neighbors() {
        let items = vec![Draggable::new("a", 5.0), Draggable::new("b", 5.0)];
        assert!(needs_rebalance(&items, 1e-9));
        assert!(!needs_rebalance(&Vec::<Draggable>::new(), 1e-9));
    }

    #[test]
    fn test_rebalance_column_moves_stay_in_column() {
        let board = BoardSnapshot::new(vec![Column::new("todo", "To Do", 1.0)
            .with_task(BoardTask::new("t1", "One", "todo", 1e-12))
            .with_task(BoardTask::new("t2", "Two", "todo", 2e-12))]);

        let moves = board.rebalance_column(&ColumnId::from("todo"), 65535.0).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| !m.is_cross_column()));
        assert_eq!(moves[0].task_id.as_str(), "t1");
        assert_eq!(moves[1].position, Position::new(131070.0));

        assert!(board.rebalance_column(&ColumnId::from("nope"), 1.0).is_err());
    }

    #[test]
    fn test_rebalance_column_if_needed_uses_config() {
        let cramped = BoardSnapshot::new(vec![Column::new("todo", "To Do", 1.0)
            .with_task(BoardTask::new("t1", "One", "todo", 1.0))
            .with_task(BoardTask::new("t2", "Two", "todo", 1.0 + 1e-12))]);
        let config = BoardConfig {
            rebalance_spacing: 100.0,
            ..Default::default()
        };

        let id = ColumnId::from("todo");
        let moves = cramped.rebalance_column_if_needed(&id, &config).unwrap();
        let positions: Vec<Position> = moves.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![Position::new(100.0), Position::new(200.0)]);

        let roomy = BoardConfig {
            min_gap: 1e-15,
            ..config.clone()
        };
        assert!(cramped.rebalance_column_if_needed(&id, &roomy).unwrap().is_empty());

        let missing = cramped.rebalance_column_if_needed(&ColumnId::from("nope"), &config);
        assert!(missing.unwrap_err().is_stale_state());
    }

    #[test]
    fn test_rebalance_columns_if_needed_uses_config() {
        let config = BoardConfig {
            min_gap: 0.1,
            rebalance_spacing: 10.0,
            ..Default::default()
        };

        let spread = BoardSnapshot::new(vec![
            Column::new("a", "A", 1.0),
            Column::new("b", "B", 2.0),
        ]);
        assert!(spread.rebalance_columns_if_needed(&config).is_empty());

        let tight = BoardSnapshot::new(vec![
            Column::new("a", "A", 1.0),
            Column::new("b", "B", 1.05),
        ]);
        let moves = tight.rebalance_columns_if_needed(&config);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[1].position, Position::new(20.0));
    }

    #[test]
    fn test_rebalance_columns() {
        let board = BoardSnapshot::new(vec![
            Column::new("b", "B", 0.75),
            Column::new("a", "A", 0.5),
        ]);
        let moves = board.rebalance_columns(100.0);
        assert_eq!(moves[0].column_id.as_str(), "a");
        assert_eq!(moves[1].position, Position::new(200.0));
    }
}
