//! Command implementations for the CLI interface.
//!
//! Every command starts a fresh in-memory session (seeded with the starter
//! tasks unless `--empty` is given) and either hands it to the TUI or runs the
//! view pipeline once and prints the result.

use std::io::{self, Write};

use clap::{Args, Subcommand};
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::cli::Cli;
use crate::dates::{format_due, today};
use crate::fields::{SortKey, StatusFilter};
use crate::session::{Session, SessionView};
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::run::run_tui;
use crate::view::{is_overdue, AnalyticsSummary, FilterCriteria};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Print the visible tasks of a fresh session.
    List {
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print completion progress and the overdue count of a fresh session.
    Stats {
        /// Start without the starter tasks.
        #[arg(long)]
        empty: bool,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// List options shared by the UI and list commands.
#[derive(Args, Debug, Clone)]
pub struct CriteriaArgs {
    /// Status filter: all | active | completed.
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,
    /// Case-insensitive text to search for.
    #[arg(long, default_value = "")]
    pub search: String,
    /// Hide completed tasks regardless of --status.
    #[arg(long)]
    pub hide_completed: bool,
    /// Sort key: due-date | priority | none.
    #[arg(long, value_enum, default_value_t = SortKey::DueDate)]
    pub sort: SortKey,
    /// Start without the starter tasks.
    #[arg(long)]
    pub empty: bool,
}

impl Default for CriteriaArgs {
    fn default() -> Self {
        CriteriaArgs {
            status: StatusFilter::All,
            search: String::new(),
            hide_completed: false,
            sort: SortKey::DueDate,
            empty: false,
        }
    }
}

impl CriteriaArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            status: self.status,
            search_term: self.search.clone(),
            show_completed: !self.hide_completed,
            sort_key: self.sort,
        }
    }
}

/// A new session, optionally seeded with the starter tasks.
pub fn new_session(empty: bool, criteria: FilterCriteria) -> Session {
    let store = if empty {
        TaskStore::new()
    } else {
        TaskStore::with_starter_tasks(today())
    };
    debug!(tasks = store.len(), "session started");
    Session::new(store, criteria)
}

pub fn cmd_ui(criteria: CriteriaArgs) -> io::Result<()> {
    run_tui(new_session(criteria.empty, criteria.to_criteria()))
}

pub fn cmd_list(criteria: CriteriaArgs, json: bool) -> io::Result<()> {
    let session = new_session(criteria.empty, criteria.to_criteria());
    write_list(&mut io::stdout().lock(), &session.view(), json)
}

pub fn cmd_stats(empty: bool, json: bool) -> io::Result<()> {
    let session = new_session(empty, FilterCriteria::default());
    write_stats(&mut io::stdout().lock(), &session.view().analytics, json)
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Write the visible tasks as a table or as JSON.
pub fn write_list(out: &mut impl Write, view: &SessionView, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &view.visible)?;
        writeln!(out)
    } else {
        write_table(out, &view.visible, view)
    }
}

/// Print tasks in a fixed-width table.
fn write_table(out: &mut impl Write, tasks: &[Task], view: &SessionView) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<5} {:<12} {:<8} {:<10} {}",
        "ID", "State", "Due", "Priority", "Category", "Task"
    )?;
    for t in tasks {
        let state = if t.completed {
            "done"
        } else if is_overdue(t, view.today) {
            "late"
        } else {
            "open"
        };
        writeln!(
            out,
            "{:<5} {:<5} {:<12} {:<8} {:<10} {}",
            t.id,
            state,
            format_due(t.due_date),
            t.priority.label(),
            t.category.label(),
            truncate(&t.text, 60)
        )?;
    }
    writeln!(
        out,
        "{} of {} task(s) shown | {}% complete | {} overdue",
        tasks.len(),
        view.analytics.total,
        view.analytics.progress_percent,
        view.analytics.overdue_count
    )
}

pub fn write_stats(out: &mut impl Write, analytics: &AnalyticsSummary, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, analytics)?;
        writeln!(out)
    } else {
        writeln!(
            out,
            "Progress: {}% ({}/{} done)",
            analytics.progress_percent, analytics.completed, analytics.total
        )?;
        writeln!(out, "Overdue:  {}", analytics.overdue_count)
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixed_view(criteria: FilterCriteria) -> SessionView {
        let today = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
        Session::new(TaskStore::with_starter_tasks(today), criteria).view_on(today)
    }

    #[test]
    fn table_lists_visible_tasks_with_summary() {
        let view = fixed_view(FilterCriteria::default());
        let mut out = Vec::new();
        write_list(&mut out, &view, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("3     done  Oct 17"));
        assert!(lines[1].ends_with("Start final project proposal"));
        assert!(lines[2].contains("Oct 20"));
        assert!(lines[3].contains("Exam Prep"));
        assert_eq!(lines[5], "4 of 4 task(s) shown | 25% complete | 0 overdue");
    }

    #[test]
    fn json_output_uses_display_names() {
        let view = fixed_view(FilterCriteria {
            search_term: "midterm".into(),
            ..FilterCriteria::default()
        });
        let mut out = Vec::new();
        write_list(&mut out, &view, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": 2,
                "text": "Study for History Midterm",
                "completed": false,
                "priority": "High",
                "dueDate": "2024-10-22",
                "category": "Exam Prep"
            }])
        );
    }

    #[test]
    fn stats_report_progress_and_overdue() {
        let analytics = AnalyticsSummary {
            total: 3,
            completed: 1,
            progress_percent: 33,
            overdue_count: 2,
        };
        let mut out = Vec::new();
        write_stats(&mut out, &analytics, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Progress: 33% (1/3 done)\nOverdue:  2\n"
        );

        let mut out = Vec::new();
        write_stats(&mut out, &analytics, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["progressPercent"], 33);
        assert_eq!(value["overdueCount"], 2);
    }

    #[test]
    fn empty_session_has_no_tasks() {
        let session = new_session(true, FilterCriteria::default());
        assert!(session.store().is_empty());
        assert_eq!(session.view().analytics.progress_percent, 0);
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
