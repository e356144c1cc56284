//! The authoritative, in-memory task collection.
//!
//! `TaskStore` holds tasks newest first behind an `Arc`. Every mutation builds
//! a fresh vector and installs it as the new snapshot, so anyone still holding
//! an older snapshot keeps seeing exactly what they were handed and can detect
//! the change with [`Arc::ptr_eq`].

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::dates::{default_due_date, today};
use crate::error::TaskError;
use crate::fields::{Category, Priority};
use crate::task::{NewTask, Task};

/// In-memory store for the tasks of one session.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Arc<Vec<Task>>,
    next_id: u64,
    revision: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// An empty store.
    pub fn new() -> Self {
        TaskStore {
            tasks: Arc::new(Vec::new()),
            next_id: 1,
            revision: 0,
        }
    }

    /// A store holding the four sample tasks a new session opens with,
    /// due dates placed around `today`.
    pub fn with_starter_tasks(today: NaiveDate) -> Self {
        let starter = [
            ("Complete Math Homework 5.1", false, Priority::High, 1, Category::Homework),
            ("Study for History Midterm", false, Priority::High, 3, Category::ExamPrep),
            ("Start final project proposal", true, Priority::Medium, -2, Category::Project),
            ("Schedule a group meeting", false, Priority::Low, 5, Category::Personal),
        ];
        let tasks: Vec<Task> = starter
            .into_iter()
            .zip(1u64..)
            .map(|((text, completed, priority, offset, category), id)| Task {
                id,
                text: text.to_string(),
                completed,
                priority,
                due_date: Some(today + Duration::days(offset)),
                category,
            })
            .collect();
        TaskStore {
            next_id: tasks.len() as u64 + 1,
            tasks: Arc::new(tasks),
            revision: 0,
        }
    }

    /// The current snapshot, newest task first.
    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    /// Borrow the current tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of snapshots installed since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task using today's local date for the default due date.
    pub fn add(&mut self, new_task: NewTask) -> Result<Task, TaskError> {
        self.add_on(new_task, today())
    }

    /// Add a task, resolving the default due date against `today`.
    ///
    /// Rejects text that is empty after trimming without touching the store.
    /// On success the task is placed at the front of the collection.
    pub fn add_on(&mut self, new_task: NewTask, today: NaiveDate) -> Result<Task, TaskError> {
        let text = new_task.text.trim();
        if text.is_empty() {
            warn!("rejected task with empty text");
            return Err(TaskError::EmptyText);
        }

        let task = Task {
            id: self.next_id,
            text: text.to_string(),
            completed: false,
            priority: new_task.priority.unwrap_or_default(),
            due_date: Some(new_task.due_date.unwrap_or_else(|| default_due_date(today))),
            category: new_task.category.unwrap_or_default(),
        };
        self.next_id += 1;

        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(task.clone());
        tasks.extend(self.tasks.iter().cloned());
        self.install(tasks);
        debug!(id = task.id, due = ?task.due_date, "added task");
        Ok(task)
    }

    /// Flip `completed` on the task with `id`. Unknown ids change nothing.
    pub fn toggle_complete(&mut self, id: u64) {
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                if t.id == id {
                    Task {
                        completed: !t.completed,
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        self.install(tasks);
        debug!(id, "toggled task");
    }

    /// Remove the task with `id` if present.
    pub fn delete(&mut self, id: u64) {
        let tasks = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.install(tasks);
        debug!(id, "deleted task");
    }

    /// Remove every completed task, keeping the others in order.
    /// Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        let tasks: Vec<Task> = self.tasks.iter().filter(|t| !t.completed).cloned().collect();
        let removed = before - tasks.len();
        self.install(tasks);
        debug!(removed, "cleared completed tasks");
        removed
    }

    fn install(&mut self, tasks: Vec<Task>) {
        self.tasks = Arc::new(tasks);
        self.revision += 1;
    }
}
