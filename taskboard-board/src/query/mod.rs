//! Task view pipeline: the filters and sorting a board applies to each
//! column's tasks before display.

mod filter;
mod sort;

pub use filter::{CompletedSince, DueDateFilter, StatusFilter, TaskFilters, TaskStatus};
pub use sort::{SortDirection, SortKind, TaskSorting};

use crate::types::{BoardTask, Column};
use chrono::{DateTime, FixedOffset};
use filter::{Clock, CompiledFilters};
use serde::{Deserialize, Serialize};
use taskboard_config::{BoardConfig, WeekStart};
use tracing::trace;

/// Everything the user selected in the board controls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskQuery {
    pub filters: TaskFilters,
    pub status: StatusFilter,
    pub sorting: TaskSorting,
    pub week_start: WeekStart,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the week start from configuration
    pub fn with_config(mut self, config: &BoardConfig) -> Self {
        self.week_start = config.week_start;
        self
    }

    pub fn with_filters(mut self, filters: TaskFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_sorting(mut self, sorting: TaskSorting) -> Self {
        self.sorting = sorting;
        self
    }

    /// Whether tasks may be dragged while this query is active
    pub fn allows_manual_reorder(&self) -> bool {
        self.sorting.allows_manual_reorder()
    }

    /// Filter and sort `tasks`; dates are compared in `now`'s offset
    pub fn apply<'t>(
        &self,
        tasks: &'t [BoardTask],
        now: DateTime<FixedOffset>,
    ) -> Vec<&'t BoardTask> {
        let clock = Clock {
            now,
            week_start: self.week_start,
        };
        let filters = CompiledFilters::new(&self.filters);

        let mut view: Vec<&BoardTask> = tasks
            .iter()
            .filter(|task| filters.matches(task, &clock) && self.status.matches(task, &clock))
            .collect();
        self.sorting.sort(&mut view);

        trace!(total = tasks.len(), shown = view.len(), "applied task query");
        view
    }

    /// Apply to one column
    pub fn apply_to_column<'t>(
        &self,
        column: &'t Column,
        now: DateTime<FixedOffset>,
    ) -> Vec<&'t BoardTask> {
        self.apply(&column.tasks, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-14T15:00:00+00:00").unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn column() -> Column {
        Column::new("c", "Column", 1.0)
            .with_task(
                BoardTask::new("t1", "Write docs", "c", 30.0)
                    .with_assignee("ann")
                    .with_label("docs"),
            )
            .with_task(
                BoardTask::new("t2", "Fix login", "c", 10.0)
                    .with_assignee("bob")
                    .with_due_date(at("2026-10-13T09:00:00Z")),
            )
            .with_task(
                BoardTask::new("t3", "Docs review", "c", 20.0)
                    .with_assignee("bob")
                    .with_label("docs")
                    .completed(at("2026-10-14T09:00:00Z")),
            )
    }

    fn ids(tasks: &[&BoardTask]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_default_query_sorts_by_position() {
        let column = column();
        assert_eq!(ids(&TaskQuery::new().apply_to_column(&column, now())), ["t2", "t3", "t1"]);
    }

    #[test]
    fn test_filters_combine() {
        let column = column();
        let query = TaskQuery::new().with_filters(TaskFilters {
            task_name: Some("DOCS".into()),
            members: vec!["bob".into()],
            ..Default::default()
        });
        assert_eq!(ids(&query.apply_to_column(&column, now())), ["t3"]);
    }

    #[test]
    fn test_label_filter_matches_any() {
        let column = column();
        let query = TaskQuery::new().with_filters(TaskFilters {
            labels: vec!["docs".into(), "urgent".into()],
            ..Default::default()
        });
        assert_eq!(ids(&query.apply_to_column(&column, now())), ["t3", "t1"]);
    }

    #[test]
    fn test_overdue_and_incomplete() {
        let column = column();
        let overdue = TaskQuery::new().with_filters(TaskFilters {
            due_date: Some(DueDateFilter::Overdue),
            ..Default::default()
        });
        assert_eq!(ids(&overdue.apply_to_column(&column, now())), ["t2"]);

        let open = TaskQuery::new().with_status(StatusFilter::incomplete());
        assert_eq!(ids(&open.apply_to_column(&column, now())), ["t2", "t1"]);
    }

    #[test]
    fn test_sorted_query_disables_reorder() {
        let column = column();
        let query = TaskQuery::new()
            .with_status(StatusFilter::complete_since(CompletedSince::Today))
            .with_sorting(TaskSorting::new(SortKind::Name, SortDirection::Ascending));
        assert!(!query.allows_manual_reorder());
        assert_eq!(ids(&query.apply_to_column(&column, now())), ["t3"]);
    }

    #[test]
    fn test_empty_name_filter_is_ignored() {
        let column = column();
        let query = TaskQuery::new().with_filters(TaskFilters {
            task_name: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(query.apply_to_column(&column, now()).len(), 3);
    }

    #[test]
    fn test_week_start_from_config() {
        let config = BoardConfig {
            week_start: WeekStart::Monday,
            ..Default::default()
        };
        assert_eq!(TaskQuery::new().with_config(&config).week_start, WeekStart::Monday);
    }

    #[test]
    fn test_query_deserializes_from_controls_state() {
        let query: TaskQuery = serde_json::from_value(serde_json::json!({
            "filters": { "taskName": "docs", "dueDate": "this_week" },
            "status": { "status": "complete", "since": "one_week" },
            "sorting": { "kind": "due_date", "direction": "descending" }
        }))
        .unwrap();
        assert_eq!(query.filters.due_date, Some(DueDateFilter::ThisWeek));
        assert_eq!(query.status.since, CompletedSince::OneWeek);
        assert_eq!(query.sorting.kind, SortKind::DueDate);
        assert_eq!(query.week_start, WeekStart::Sunday);
    }
}
