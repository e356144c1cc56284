//! Error type for task operations.

/// Errors raised by the task store.
///
/// Toggle, delete and clear-completed are total; only adding can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Task cannot be empty.")]
    EmptyText,
}
