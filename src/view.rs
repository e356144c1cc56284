//! The view pipeline: filter → search → sort over a task snapshot, plus the
//! derived analytics. Everything here is a pure function of its inputs.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::fields::{SortKey, StatusFilter};
use crate::task::Task;

/// The active combination of list options chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub search_term: String,
    /// When false, completed tasks are hidden whatever `status` says.
    pub show_completed: bool,
    pub sort_key: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            status: StatusFilter::All,
            search_term: String::new(),
            show_completed: true,
            sort_key: SortKey::DueDate,
        }
    }
}

impl FilterCriteria {
    /// Whether a single task passes every filter predicate.
    ///
    /// `status = Completed` together with `show_completed = false` rejects
    /// everything; the two switches are independent.
    pub fn matches(&self, task: &Task) -> bool {
        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        };
        let matches_search = task
            .text
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());
        let matches_show_completed = self.show_completed || !task.completed;
        matches_status && matches_search && matches_show_completed
    }
}

/// Derived summary statistics for a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total: usize,
    pub completed: usize,
    pub progress_percent: u8,
    pub overdue_count: usize,
}

/// The tasks to show for `criteria`, in display order.
pub fn compute_visible(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks.iter().filter(|t| criteria.matches(t)).cloned().collect();
    // `sort_by` is stable, so ties keep their input order.
    match criteria.sort_key {
        SortKey::Priority => visible.sort_by_key(|t| t.priority.rank()),
        SortKey::DueDate => visible.sort_by(|a, b| compare_due(a.due_date, b.due_date)),
        SortKey::None => {}
    }
    visible
}

/// Ascending by date; undated tasks go after dated ones.
fn compare_due(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Whether `task` is incomplete and due strictly before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date.is_some_and(|d| d < today)
}

/// Completion percentage and overdue count over the whole collection.
///
/// `today` must be sampled by the caller for every computation.
pub fn compute_analytics(tasks: &[Task], today: NaiveDate) -> AnalyticsSummary {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let progress_percent = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    } else {
        0
    };
    let overdue_count = tasks.iter().filter(|t| is_overdue(t, today)).count();
    AnalyticsSummary {
        total,
        completed,
        progress_percent,
        overdue_count,
    }
}
