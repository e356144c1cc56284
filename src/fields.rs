//! Enumerations and field types for tasks and list views.
//!
//! This module defines the structured values a task carries (priority and
//! category) together with the options that drive the visible list
//! (status filter and sort key).

use clap::ValueEnum;
use serde::Serialize;

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank, lower first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Academic category a task belongs to.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub enum Category {
    #[default]
    Homework,
    #[serde(rename = "Exam Prep")]
    ExamPrep,
    Project,
    Reading,
    Personal,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Homework,
        Category::ExamPrep,
        Category::Project,
        Category::Reading,
        Category::Personal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Homework => "Homework",
            Category::ExamPrep => "Exam Prep",
            Category::Project => "Project",
            Category::Reading => "Reading",
            Category::Personal => "Personal",
        }
    }
}

/// Completion status filter for the visible list.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    /// Next filter in the all → active → completed cycle.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }
}

/// Available sorting options for the visible list.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    /// Keep insertion order (newest first).
    None,
}

impl SortKey {
    /// Next key in the due date → priority → none cycle.
    pub fn next(self) -> Self {
        match self {
            SortKey::DueDate => SortKey::Priority,
            SortKey::Priority => SortKey::None,
            SortKey::None => SortKey::DueDate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DueDate => "Due Date",
            SortKey::Priority => "Priority",
            SortKey::None => "Added",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn category_serializes_with_display_names() {
        let json = serde_json::to_string(&Category::ExamPrep).unwrap();
        assert_eq!(json, "\"Exam Prep\"");
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
        for priority in Priority::ALL {
            let json = serde_json::to_string(&priority).unwrap();
            assert_eq!(json, format!("\"{}\"", priority.label()));
        }
        assert_eq!(Category::default(), Category::Homework);
    }

    #[test]
    fn cycles_wrap_around() {
        assert_eq!(StatusFilter::Completed.next(), StatusFilter::All);
        assert_eq!(SortKey::None.next(), SortKey::DueDate);
        assert_eq!(SortKey::DueDate.next().next(), SortKey::None);
    }
}
