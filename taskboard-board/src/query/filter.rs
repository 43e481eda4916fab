//! Task filters: name, members, labels, due date and completion status

use crate::types::{BoardTask, LabelId, MemberId};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use taskboard_config::WeekStart;

/// Due date windows, evaluated relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDateFilter {
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
    Overdue,
    NoDueDate,
}

/// Filters chosen in the board's filter menu; empty fields filter nothing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskFilters {
    /// Case-insensitive substring of the task name
    pub task_name: Option<String>,
    /// Keep tasks assigned to any of these members
    pub members: Vec<MemberId>,
    /// Keep tasks carrying any of these labels
    pub labels: Vec<LabelId>,
    pub due_date: Option<DueDateFilter>,
}

impl TaskFilters {
    /// Number of active filters, as shown on the filter button
    pub fn active_count(&self) -> usize {
        usize::from(self.task_name.as_deref().is_some_and(|n| !n.is_empty()))
            + self.members.len()
            + self.labels.len()
            + usize::from(self.due_date.is_some())
    }
}

/// Completion status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    All,
    Incomplete,
    Complete,
}

/// How far back completed tasks are kept when filtering on [`TaskStatus::Complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletedSince {
    #[default]
    All,
    Today,
    Yesterday,
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusFilter {
    pub status: TaskStatus,
    pub since: CompletedSince,
}

impl StatusFilter {
    pub fn incomplete() -> Self {
        Self {
            status: TaskStatus::Incomplete,
            since: CompletedSince::All,
        }
    }

    pub fn complete_since(since: CompletedSince) -> Self {
        Self {
            status: TaskStatus::Complete,
            since,
        }
    }
}

/// Calendar helpers anchored at one instant in one offset
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    pub now: DateTime<FixedOffset>,
    pub week_start: WeekStart,
}

impl Clock {
    fn offset(&self) -> FixedOffset {
        self.now.timezone()
    }

    fn local<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset())
    }

    fn midnight(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        let local = date.and_time(chrono::NaiveTime::MIN);
        let utc = local - Duration::seconds(i64::from(self.offset().local_minus_utc()));
        self.offset().from_utc_datetime(&utc)
    }

    fn start_of_day(&self, at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        self.midnight(at.date_naive())
    }

    fn start_of_week(&self, at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let date = at.date_naive();
        let back = match self.week_start {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        self.midnight(date - Duration::days(i64::from(back)))
    }

    /// Last millisecond of the week containing `at`
    fn end_of_week(&self, at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        self.start_of_week(at) + Duration::weeks(1) - Duration::milliseconds(1)
    }

    /// Open window `(now - 1 day, now + weeks + 1 day)`
    fn within_weeks(&self, due: DateTime<FixedOffset>, weeks: i64) -> bool {
        due > self.now - Duration::days(1)
            && due < self.now + Duration::weeks(weeks) + Duration::days(1)
    }
}

impl DueDateFilter {
    pub(crate) fn matches(self, task: &BoardTask, clock: &Clock) -> bool {
        let Some(due) = task.due_date.as_ref().map(|d| clock.local(d)) else {
            return self == Self::NoDueDate;
        };
        let now = clock.now;

        match self {
            Self::Today => due.date_naive() == now.date_naive(),
            Self::Tomorrow => due.date_naive() == (now + Duration::days(1)).date_naive(),
            Self::ThisWeek => {
                due > now - Duration::days(1) && due < clock.end_of_week(now) + Duration::days(1)
            }
            Self::NextWeek => {
                due > clock.end_of_week(now) && due < clock.start_of_week(now + Duration::weeks(2))
            }
            Self::OneWeek => clock.within_weeks(due, 1),
            Self::TwoWeeks => clock.within_weeks(due, 2),
            Self::ThreeWeeks => clock.within_weeks(due, 3),
            Self::Overdue => due < now && !task.complete,
            Self::NoDueDate => false,
        }
    }
}

impl CompletedSince {
    fn cutoff(self, clock: &Clock) -> Option<DateTime<FixedOffset>> {
        let now = clock.now;
        match self {
            Self::All => None,
            Self::Today => Some(clock.start_of_day(now)),
            Self::Yesterday => Some(clock.start_of_day(now - Duration::days(1))),
            Self::OneWeek => Some(now - Duration::weeks(1)),
            Self::TwoWeeks => Some(now - Duration::weeks(2)),
            Self::ThreeWeeks => Some(now - Duration::weeks(3)),
        }
    }
}

impl StatusFilter {
    pub(crate) fn matches(&self, task: &BoardTask, clock: &Clock) -> bool {
        match self.status {
            TaskStatus::All => true,
            TaskStatus::Incomplete => !task.complete,
            TaskStatus::Complete => {
                task.complete
                    && match self.since.cutoff(clock) {
                        None => true,
                        Some(cutoff) => task
                            .completed_at
                            .as_ref()
                            .is_some_and(|at| clock.local(at) > cutoff),
                    }
            }
        }
    }
}

/// Filters compiled into set lookups for one pass over a column
pub(crate) struct CompiledFilters<'f> {
    name: Option<String>,
    members: HashSet<&'f MemberId>,
    labels: HashSet<&'f LabelId>,
    due_date: Option<DueDateFilter>,
}

impl<'f> CompiledFilters<'f> {
    pub(crate) fn new(filters: &'f TaskFilters) -> Self {
        Self {
            name: filters
                .task_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(str::to_lowercase),
            members: filters.members.iter().collect(),
            labels: filters.labels.iter().collect(),
            due_date: filters.due_date,
        }
    }

    pub(crate) fn matches(&self, task: &BoardTask, clock: &Clock) -> bool {
        if let Some(ref name) = self.name {
            if !task.name.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }

        if !self.members.is_empty() && !task.assigned.iter().any(|m| self.members.contains(m)) {
            return false;
        }

        if !self.labels.is_empty() && !task.labels.iter().any(|l| self.labels.contains(l)) {
            return false;
        }

        self.due_date.is_none_or(|due| due.matches(task, clock))
    }
}
