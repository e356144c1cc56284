//! Main application logic for the terminal user interface.
//!
//! `App` owns a [`Session`], forwards key presses to it, and renders the
//! session's view: the analytics header, the filtered and sorted task table,
//! the add form, and the help and confirmation popups.

use std::io;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::info;

use crate::{
    dates::{format_due, today},
    session::{Session, SessionView},
    tui::{
        colors::{priority_color, EMERALD, INDIGO, ROSE, SLATE},
        enums::{AppState, FormField, InputMode},
        notice::NoticeSlot,
        task_form::TaskForm,
        utils::centered_rect,
    },
    view::is_overdue,
};

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    session: Session,
    task_list_state: TableState,
    /// Ids of the rows on screen, in display order, as of the last refresh.
    visible_ids: Vec<u64>,
    /// Row to select on the next refresh, by id.
    pending_select: Option<u64>,
    task_form: TaskForm,
    input_mode: InputMode,
    status_message: String,
    notice: NoticeSlot,
    confirm_action: Option<String>,
    /// Fixed calendar date; `None` samples the local date on every view.
    pinned_date: Option<NaiveDate>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            session,
            task_list_state: TableState::default(),
            visible_ids: Vec::new(),
            pending_select: None,
            task_form: TaskForm::new(),
            input_mode: InputMode::None,
            status_message: String::new(),
            notice: NoticeSlot::default(),
            confirm_action: None,
            pinned_date: None,
        };
        app.refresh_view();
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Evaluate every view and add against `date` instead of the local date.
    #[cfg(test)]
    fn pin_date(mut self, date: NaiveDate) -> Self {
        self.pinned_date = Some(date);
        self.refresh_view();
        self
    }

    fn today(&self) -> NaiveDate {
        self.pinned_date.unwrap_or_else(today)
    }

    /// Recompute the view and keep the selection on the same task when it is
    /// still visible, otherwise on the first row.
    fn refresh_view(&mut self) -> SessionView {
        let view = self.session.view_on(self.today());
        let old_selected_id = self
            .pending_select
            .take()
            .or_else(|| self.selected_task_id());

        self.visible_ids = view.visible.iter().map(|t| t.id).collect();

        let new_idx = old_selected_id
            .and_then(|id| self.visible_ids.iter().position(|&v| v == id))
            .or_else(|| {
                let previous = self.task_list_state.selected().unwrap_or(0);
                if self.visible_ids.is_empty() {
                    None
                } else {
                    Some(previous.min(self.visible_ids.len() - 1))
                }
            });
        self.task_list_state.select(new_idx);
        view
    }

    fn selected_task_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.visible_ids.get(idx))
            .copied()
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Handle one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && matches!(key, KeyCode::Char('c') | KeyCode::Char('q')) {
            return true;
        }
        self.status_message.clear();

        let quit = match self.state {
            AppState::TaskList => self.handle_task_list_input(key),
            AppState::AddTask => {
                self.handle_form_input(key, now);
                false
            }
            AppState::Help => {
                self.state = AppState::TaskList;
                false
            }
            AppState::Confirm => {
                self.handle_confirm_input(key);
                false
            }
        };
        self.refresh_view();
        quit
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Search {
            let mut term = self.session.criteria().search_term.clone();
            match key {
                KeyCode::Esc => {
                    term.clear();
                    self.input_mode = InputMode::None;
                }
                KeyCode::Enter => {
                    self.input_mode = InputMode::None;
                    if !term.is_empty() {
                        self.set_status_message(format!("Search applied: '{term}'"));
                    }
                }
                KeyCode::Backspace => {
                    term.pop();
                }
                KeyCode::Char(c) => term.push(c),
                _ => {}
            }
            self.session.set_search_term(term);
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.session.criteria().search_term.is_empty() {
                    return true;
                }
                self.session.set_search_term("");
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = self.task_list_state.selected().unwrap_or(0);
                if !self.visible_ids.is_empty() {
                    self.task_list_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.visible_ids.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if !self.visible_ids.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    self.session.toggle_complete(id);
                    self.pending_select = Some(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    let text = self.session.store().get(id).map(|t| t.text.clone()).unwrap_or_default();
                    self.session.delete(id);
                    self.set_status_message(format!("Deleted: {text}"));
                }
            }
            KeyCode::Char('a') => {
                self.task_form.current_field = FormField::Text;
                self.state = AppState::AddTask;
            }
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('f') => {
                self.session.cycle_status();
                let label = self.session.criteria().status.label();
                self.set_status_message(format!("Showing: {label}"));
            }
            KeyCode::Char('c') => {
                self.session.toggle_show_completed();
                let shown = if self.session.criteria().show_completed { "shown" } else { "hidden" };
                self.set_status_message(format!("Completed tasks {shown}"));
            }
            KeyCode::Char('s') => {
                self.session.cycle_sort();
                let label = self.session.criteria().sort_key.label();
                self.set_status_message(format!("Sorted by {label}"));
            }
            KeyCode::Char('X') => {
                let completed = self.session.store().tasks().iter().filter(|t| t.completed).count();
                if completed == 0 {
                    self.set_status_message("No completed tasks to clear");
                } else {
                    self.confirm_action = Some(format!("Clear {completed} completed task(s)"));
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Esc => self.state = AppState::TaskList,
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => self.create_task(now),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    /// Submit the add form. Empty text raises the timed notice and keeps the
    /// form open; success clears the notice and resets the form.
    fn create_task(&mut self, now: Instant) {
        let today = self.today();
        let new_task = match self.task_form.to_new_task(today) {
            Ok(new_task) => new_task,
            Err(raw) => {
                self.set_status_message(format!("Unrecognised due date: '{raw}'"));
                return;
            }
        };

        match self.session.add_on(new_task, today) {
            Ok(task) => {
                info!(id = task.id, "task added from form");
                self.notice.clear();
                self.task_form.reset();
                self.state = AppState::TaskList;
                self.pending_select = Some(task.id);
                self.set_status_message(format!("Added: {}", task.text));
            }
            Err(e) => {
                self.task_form.current_field = FormField::Text;
                self.notice.raise(e.to_string(), now);
            }
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let removed = self.session.clear_completed();
                self.set_status_message(format!("Cleared {removed} completed task(s)"));
                self.confirm_action = None;
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_action = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header_text = vec![Line::from(vec![
            Span::styled("STUDENT TASK HUB", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                "Organize your academic life",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_analytics(&self, f: &mut Frame, area: Rect, view: &SessionView) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let analytics = view.analytics;
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Progress ({}/{} done)",
                analytics.completed, analytics.total
            )))
            .gauge_style(Style::default().fg(EMERALD))
            .percent(u16::from(analytics.progress_percent));
        f.render_widget(gauge, chunks[0]);

        let overdue_style = if analytics.overdue_count > 0 {
            Style::default().fg(ROSE).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let overdue = Paragraph::new(Line::from(vec![
            Span::raw("Overdue: "),
            Span::styled(analytics.overdue_count.to_string(), overdue_style),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Attention"))
        .alignment(Alignment::Center);
        f.render_widget(overdue, chunks[1]);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect, view: &SessionView) {
        let criteria = self.session.criteria();
        let mut criteria_spans = vec![
            Span::raw(format!(" Filter: {}", criteria.status.label())),
            Span::raw(format!("  Sort: {}", criteria.sort_key.label())),
            Span::raw(format!(
                "  Completed: {}",
                if criteria.show_completed { "shown" } else { "hidden" }
            )),
        ];
        if !criteria.search_term.is_empty() {
            criteria_spans.push(Span::styled(
                format!("  Search: '{}'", criteria.search_term),
                Style::default().fg(Color::Cyan),
            ));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        f.render_widget(Paragraph::new(Line::from(criteria_spans)), chunks[0]);

        let header_cells = ["", "Task", "Due", "Priority", "Category"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(INDIGO).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = view
            .visible
            .iter()
            .map(|task| {
                let (check, text_style) = if task.completed {
                    ("✓", Style::default().fg(SLATE).add_modifier(Modifier::CROSSED_OUT))
                } else {
                    ("○", Style::default().fg(Color::White))
                };
                let due_style = if is_overdue(task, view.today) {
                    Style::default().fg(ROSE).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(check).style(Style::default().fg(if task.completed { EMERALD } else { SLATE })),
                    Cell::from(task.text.clone()).style(text_style),
                    Cell::from(format_due(task.due_date)).style(due_style),
                    Cell::from(task.priority.label()).style(Style::default().fg(priority_color(task.priority))),
                    Cell::from(task.category.label()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Min(30),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(10),
        ];

        let title = if view.visible.is_empty() {
            "No tasks here - press 'a' to add one".to_string()
        } else {
            format!(
                "Tasks ({}/{}) - Press 'h' for help",
                view.visible.len(),
                view.analytics.total
            )
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);
    }

    fn render_task_form(&mut self, f: &mut Frame, area: Rect, now: Instant) {
        let area = centered_rect(60, 50, area);
        f.render_widget(Clear, area);

        let form = &self.task_form;
        let field_style = |field: FormField| {
            if form.current_field == field {
                Style::default().fg(Color::White).bg(INDIGO)
            } else {
                Style::default()
            }
        };
        let due_hint = if form.due.value.is_empty() { "(in 7 days)" } else { "" };

        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("{:<10}", FormField::Text.label())),
                Span::styled(form.text.value.clone(), field_style(FormField::Text)),
            ]),
        ];
        if let Some(notice) = self.notice.active(now) {
            lines.push(Line::from(Span::styled(
                format!("{:<10}! {}", "", notice.message),
                Style::default().fg(ROSE).add_modifier(Modifier::BOLD),
            )));
        }
        lines.extend([
            Line::from(vec![
                Span::raw(format!("{:<10}", FormField::Priority.label())),
                Span::styled(
                    format!("< {} >", form.priority().label()),
                    field_style(FormField::Priority).fg(priority_color(form.priority())),
                ),
            ]),
            Line::from(vec![
                Span::raw(format!("{:<10}", FormField::Category.label())),
                Span::styled(format!("< {} >", form.category().label()), field_style(FormField::Category)),
            ]),
            Line::from(vec![
                Span::raw(format!("{:<10}", FormField::Due.label())),
                Span::styled(form.due.value.clone(), field_style(FormField::Due)),
                Span::styled(due_hint, Style::default().fg(SLATE)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter add | Tab next field | ←/→ change | Esc cancel",
                Style::default().fg(SLATE),
            )),
        ]);

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Add a New Task"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let keys = [
            ("↑/↓ j/k", "Move selection"),
            ("Space/Enter", "Toggle complete"),
            ("d/Del", "Delete task"),
            ("a", "Add task"),
            ("/", "Search (Esc clears)"),
            ("f", "Cycle filter: all / active / completed"),
            ("c", "Show or hide completed"),
            ("s", "Cycle sort: due date / priority / added"),
            ("X", "Clear completed tasks"),
            ("q/Esc", "Quit"),
        ];
        let lines: Vec<Line> = keys
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{key:<12}"), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(*what),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - press any key to return"),
        );
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(self.confirm_action.as_deref().unwrap_or("")),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Confirm Action").borders(Borders::ALL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.input_mode == InputMode::Search {
            format!(
                "Search: {} (Esc to clear, Enter to confirm)",
                self.session.criteria().search_term
            )
        } else {
            match self.state {
                AppState::TaskList => "a add | Space toggle | / search | f filter | s sort | h help".to_string(),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(INDIGO).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen. `now` decides whether the notice is still live.
    pub fn render(&mut self, f: &mut Frame, now: Instant) {
        let view = self.refresh_view();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_analytics(f, chunks[1], &view);
        self.render_task_list(f, chunks[2], &view);
        match self.state {
            AppState::TaskList => {}
            AppState::AddTask => self.render_task_form(f, chunks[2], now),
            AppState::Help => self.render_help(f, chunks[2]),
            AppState::Confirm => self.render_confirm(f, chunks[2]),
        }
        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop. Redraws on every tick so the notice expires and the
    /// overdue count follows the date without any key being pressed.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f, Instant::now()))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code, key.modifiers, Instant::now()) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
