//! A task session: the store plus the user's current list criteria.
//!
//! This is the boundary the shells talk to. Inbound calls mutate the store or
//! replace the criteria; [`Session::view`] recomputes the visible list and the
//! analytics from scratch, sampling today's date each time.

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::today;
use crate::error::TaskError;
use crate::store::TaskStore;
use crate::task::{NewTask, Task};
use crate::view::{compute_analytics, compute_visible, AnalyticsSummary, FilterCriteria};

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub visible: Vec<Task>,
    pub analytics: AnalyticsSummary,
    /// The date the view was computed against.
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: TaskStore,
    criteria: FilterCriteria,
}

impl Session {
    pub fn new(store: TaskStore, criteria: FilterCriteria) -> Self {
        Session { store, criteria }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn add(&mut self, new_task: NewTask) -> Result<Task, TaskError> {
        self.store.add(new_task)
    }

    pub fn add_on(&mut self, new_task: NewTask, today: NaiveDate) -> Result<Task, TaskError> {
        self.store.add_on(new_task, today)
    }

    pub fn toggle_complete(&mut self, id: u64) {
        self.store.toggle_complete(id);
    }

    pub fn delete(&mut self, id: u64) {
        self.store.delete(id);
    }

    pub fn clear_completed(&mut self) -> usize {
        self.store.clear_completed()
    }

    /// Replace the criteria wholesale.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        debug!(?criteria, "criteria changed");
        self.criteria = criteria;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn cycle_status(&mut self) {
        self.criteria.status = self.criteria.status.next();
    }

    pub fn cycle_sort(&mut self) {
        self.criteria.sort_key = self.criteria.sort_key.next();
    }

    pub fn toggle_show_completed(&mut self) {
        self.criteria.show_completed = !self.criteria.show_completed;
    }

    /// Run the pipeline against today's local date.
    pub fn view(&self) -> SessionView {
        self.view_on(today())
    }

    /// Run the pipeline against `today`.
    pub fn view_on(&self, today: NaiveDate) -> SessionView {
        let snapshot = self.store.snapshot();
        SessionView {
            visible: compute_visible(&snapshot, &self.criteria),
            analytics: compute_analytics(&snapshot, today),
            today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{SortKey, StatusFilter};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn view_reflects_mutations_and_criteria() {
        let today = ymd(2024, 5, 1);
        let mut session = Session::new(TaskStore::with_starter_tasks(today), FilterCriteria::default());

        let view = session.view_on(today);
        assert_eq!(view.visible.len(), 4);
        assert_eq!(view.analytics.progress_percent, 25);
        assert_eq!(view.analytics.overdue_count, 0);
        // Due-date order: proposal (-2), math (+1), history (+3), meeting (+5).
        let ids: Vec<u64> = view.visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);

        session.toggle_complete(3);
        let view = session.view_on(today);
        assert_eq!(view.analytics.progress_percent, 0);
        assert_eq!(view.analytics.overdue_count, 1);

        session.set_criteria(FilterCriteria {
            status: StatusFilter::Active,
            search_term: "study".into(),
            show_completed: true,
            sort_key: SortKey::Priority,
        });
        let view = session.view_on(today);
        assert_eq!(view.visible.len(), 1);
        assert_eq!(view.visible[0].text, "Study for History Midterm");
    }

    #[test]
    fn analytics_follow_the_date_they_are_computed_on() {
        let today = ymd(2024, 5, 1);
        let session = Session::new(TaskStore::with_starter_tasks(today), FilterCriteria::default());
        assert_eq!(session.view_on(today).analytics.overdue_count, 0);
        // Four days on, the math homework (+1) and history midterm (+3) are late.
        assert_eq!(session.view_on(ymd(2024, 5, 5)).analytics.overdue_count, 2);
    }

    #[test]
    fn criteria_helpers_cycle() {
        let mut session = Session::default();
        session.cycle_status();
        session.cycle_sort();
        session.toggle_show_completed();
        session.set_search_term("ch");
        assert_eq!(
            session.criteria(),
            &FilterCriteria {
                status: StatusFilter::Active,
                search_term: "ch".into(),
                show_completed: false,
                sort_key: SortKey::Priority,
            }
        );
    }

    #[test]
    fn rejected_add_surfaces_error() {
        let mut session = Session::default();
        assert_eq!(session.add(NewTask::with_text(" ")), Err(TaskError::EmptyText));
        assert!(session.store().is_empty());
    }
}
