//! Task data structure and the input record used to create one.

use chrono::NaiveDate;
use serde::Serialize;

use crate::fields::{Category, Priority};

/// A single to-do item.
///
/// `text` is always trimmed and non-empty; `due_date` is an absolute calendar
/// date resolved when the task was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Category,
}

/// Values supplied when adding a task. Omitted fields take the store defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl NewTask {
    /// A draft with only text set.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
