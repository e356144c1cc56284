//! Add-task form state for the terminal user interface.
//!
//! The form collects text, priority, category and an optional due date, and
//! turns them into a [`NewTask`] for the session. After a successful add it
//! resets to the defaults (Medium, Homework, blank due date).

use chrono::NaiveDate;

use crate::{
    dates::parse_due_input,
    fields::{Category, Priority},
    task::NewTask,
    tui::{enums::FormField, input::InputField},
};

/// Form for adding a task.
pub struct TaskForm {
    pub text: InputField,
    pub due: InputField,
    pub priority: usize,
    pub category: usize,
    pub current_field: FormField,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            text: InputField::new(),
            due: InputField::new(),
            priority: index_of(&Priority::ALL, Priority::default()),
            category: index_of(&Category::ALL, Category::default()),
            current_field: FormField::Text,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn priority(&self) -> Priority {
        Priority::ALL[self.priority % Priority::ALL.len()]
    }

    pub fn category(&self) -> Category {
        Category::ALL[self.category % Category::ALL.len()]
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn prev_field(&mut self) {
        self.current_field = self.current_field.prev();
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            FormField::Text => Some(&mut self.text),
            FormField::Due => Some(&mut self.due),
            FormField::Priority | FormField::Category => None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(input) = self.active_input() {
            input.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_delete();
        }
    }

    /// Left/right move the cursor in text fields and cycle selector fields.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            FormField::Priority => self.priority = cycle(self.priority, Priority::ALL.len(), right),
            FormField::Category => self.category = cycle(self.category, Category::ALL.len(), right),
            FormField::Text | FormField::Due => {
                if let Some(input) = self.active_input() {
                    if right {
                        input.move_cursor_right();
                    } else {
                        input.move_cursor_left();
                    }
                }
            }
        }
    }

    /// Build the add request. A blank due field leaves the date to the store
    /// default; unparseable due input is reported as `Err` with the raw text.
    pub fn to_new_task(&self, today: NaiveDate) -> Result<NewTask, String> {
        let due_raw = self.due.value.trim();
        let due_date = if due_raw.is_empty() {
            None
        } else {
            Some(parse_due_input(due_raw, today).ok_or_else(|| due_raw.to_string())?)
        };
        Ok(NewTask {
            text: self.text.value.clone(),
            priority: Some(self.priority()),
            due_date,
            category: Some(self.category()),
        })
    }
}

fn index_of<T: PartialEq>(all: &[T], value: T) -> usize {
    all.iter().position(|v| *v == value).unwrap_or(0)
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
