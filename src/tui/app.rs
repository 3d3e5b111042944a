//! Main application logic for the terminal user interface.
//!
//! `App` owns the session's `TaskStore` and the current filter. Every key
//! press that changes tasks goes through a store operation, after which the
//! visible rows are rebuilt from the new snapshot.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::info;

use tasktree::filter::TaskFilter;
use tasktree::ids::TaskId;
use tasktree::store::{check_mark, TaskStore};
use tasktree::task::validate_text;

use crate::tui::{
    colors::{DARK_GREEN, DARK_RED, GOLD, SOFT_BLUE},
    enums::{AppState, ListRow},
    input::InputField,
    utils::centered_rect,
};

/// Screen position of the cursor inside a bordered prompt, kept within the border.
fn prompt_cursor(area: Rect, column: usize) -> (u16, u16) {
    let offset = u16::try_from(column).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(offset);
    (x.min(area.right().saturating_sub(2)), area.y + 1)
}

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: TaskStore,
    filter: TaskFilter,
    rows: Vec<ListRow>,
    list_state: TableState,
    input: InputField,
    keyword_before_edit: String,
    confirm_target: Option<ListRow>,
    status_message: String,
}

impl App {
    pub fn new(store: TaskStore, filter: TaskFilter) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            filter,
            rows: Vec::new(),
            list_state: TableState::default(),
            input: InputField::new(),
            keyword_before_edit: String::new(),
            confirm_target: None,
            status_message: String::new(),
        };
        app.update_rows();
        app
    }

    /// Rebuild the visible rows from the store and filter, keeping the
    /// selection on the same row when it is still visible.
    fn update_rows(&mut self) {
        let old_selected = self.selected_row();

        self.rows = self
            .filter
            .apply(self.store.tasks())
            .into_iter()
            .flat_map(|t| {
                std::iter::once(ListRow::Task(t.id)).chain(
                    t.subtasks
                        .iter()
                        .map(move |st| ListRow::Subtask { parent: t.id, id: st.id }),
                )
            })
            .collect();

        let restored = old_selected.and_then(|row| self.rows.iter().position(|r| *r == row));
        let selected = match (restored, self.list_state.selected()) {
            _ if self.rows.is_empty() => None,
            (Some(pos), _) => Some(pos),
            (None, Some(pos)) => Some(pos.min(self.rows.len() - 1)),
            (None, None) => Some(0),
        };
        self.list_state.select(selected);
    }

    fn selected_row(&self) -> Option<ListRow> {
        self.list_state.selected().and_then(|i| self.rows.get(i).copied())
    }

    fn select(&mut self, row: ListRow) {
        if let Some(pos) = self.rows.iter().position(|r| *r == row) {
            self.list_state.select(Some(pos));
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn row_text(&self, row: ListRow) -> Option<&str> {
        match row {
            ListRow::Task(id) => self.store.get(id).map(|t| t.text.as_str()),
            ListRow::Subtask { parent, id } => self
                .store
                .get(parent)
                .and_then(|t| t.subtask(id))
                .map(|st| st.text.as_str()),
        }
    }

    /// Flip completion of the selected row.
    ///
    /// Tasks with subtasks are refused: their completion follows the subtasks.
    fn toggle_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row {
            ListRow::Task(id) => {
                let Some(task) = self.store.get(id) else {
                    return;
                };
                if !task.is_leaf() {
                    let msg = format!("'{}' is done when all its subtasks are", task.text);
                    self.set_status_message(msg);
                    return;
                }
                let updated = task.with_done(!task.done);
                self.store.update_task(updated);
            }
            ListRow::Subtask { parent, id } => {
                let Some(st) = self.store.get(parent).and_then(|t| t.subtask(id)) else {
                    return;
                };
                let updated = st.with_done(!st.done);
                self.store.update_subtask(parent, updated);
            }
        }
        self.update_rows();
    }

    fn submit_task(&mut self) {
        let text = self.input.take();
        self.state = AppState::TaskList;
        match validate_text(&text) {
            Err(e) => self.set_status_message(format!("Task not added: {e}")),
            Ok(text) => {
                if let Some(id) = self.store.create_task(text) {
                    self.update_rows();
                    self.select(ListRow::Task(id));
                    if !self.rows.contains(&ListRow::Task(id)) {
                        self.set_status_message("Task added (hidden by the current filter)".to_string());
                    } else {
                        self.set_status_message("Task added".to_string());
                    }
                }
            }
        }
    }

    fn submit_subtask(&mut self, parent: TaskId) {
        let text = self.input.take();
        self.state = AppState::TaskList;
        match validate_text(&text) {
            Err(e) => self.set_status_message(format!("Subtask not added: {e}")),
            Ok(text) => {
                if let Some(id) = self.store.add_subtask(parent, text) {
                    self.update_rows();
                    self.select(ListRow::Subtask { parent, id });
                    self.set_status_message("Subtask added".to_string());
                }
            }
        }
    }

    fn delete_confirmed(&mut self) {
        let Some(row) = self.confirm_target.take() else {
            return;
        };
        let removed = match row {
            ListRow::Task(id) => self.store.delete_task(id),
            ListRow::Subtask { parent, id } => self.store.delete_subtask(parent, id),
        };
        if removed {
            self.update_rows();
            self.set_status_message("Deleted".to_string());
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.rows.len() {
                        self.list_state.select(Some(selected + 1));
                    }
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('a') => {
                self.input.clear();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('s') => {
                if let Some(row) = self.selected_row() {
                    self.input.clear();
                    self.state = AppState::AddSubtask(row.parent());
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(row) = self.selected_row() {
                    self.confirm_target = Some(row);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('/') => {
                self.keyword_before_edit = self.filter.keyword.clone();
                self.input = InputField::with_value(&self.filter.keyword);
                self.state = AppState::Keyword;
            }
            KeyCode::Char('c') => {
                self.filter.show_done = !self.filter.show_done;
                self.update_rows();
                let msg = if self.filter.show_done {
                    "Showing completed tasks"
                } else {
                    "Hiding completed tasks"
                };
                self.set_status_message(msg.to_string());
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Shared editing keys for every text prompt. Returns true if consumed.
    fn handle_text_edit(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => self.input.handle_char(c),
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            _ => return false,
        }
        true
    }

    fn handle_keyword_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.state = AppState::TaskList;
                if self.filter.keyword.is_empty() {
                    self.set_status_message("Filter cleared".to_string());
                } else {
                    self.set_status_message(format!(
                        "Filter applied: '{}' ({} tasks)",
                        self.filter.keyword,
                        self.filter.apply(self.store.tasks()).len()
                    ));
                }
            }
            KeyCode::Esc => {
                self.filter.keyword = std::mem::take(&mut self.keyword_before_edit);
                self.input.clear();
                self.state = AppState::TaskList;
                self.update_rows();
            }
            other => {
                if self.handle_text_edit(other) {
                    self.filter.keyword = self.input.value.clone();
                    self.update_rows();
                }
            }
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => match self.state {
                AppState::AddTask => self.submit_task(),
                AppState::AddSubtask(parent) => self.submit_subtask(parent),
                _ => {}
            },
            KeyCode::Esc => {
                self.input.clear();
                self.state = AppState::TaskList;
            }
            other => {
                self.handle_text_edit(other);
            }
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.delete_confirmed();
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_target = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    /// Dispatch one key press. Returns true if the application should quit.
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.clear_status_message();
        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key, modifiers),
            AppState::Keyword => self.handle_keyword_input(key),
            AppState::AddTask | AppState::AddSubtask(_) => self.handle_form_input(key),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => {
                if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
                    self.state = AppState::TaskList;
                }
            }
        }
        false
    }

    /// Poll for and handle keyboard events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn filter_summary(&self) -> String {
        if self.filter.is_passthrough() {
            return "Showing all tasks".to_string();
        }
        let keyword = if self.filter.keyword.is_empty() {
            "-".to_string()
        } else {
            format!("'{}'", self.filter.keyword)
        };
        let completed = if self.filter.show_done { "shown" } else { "hidden" };
        format!("Keyword: {keyword}  Completed: {completed}")
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header_text = vec![Line::from(vec![
            Span::styled("TASK LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                self.filter_summary(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let visible_tasks = self
            .rows
            .iter()
            .filter(|r| matches!(r, ListRow::Task(_)))
            .count();
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Tasks ({}/{}) - Press 'h' for help",
            visible_tasks,
            self.store.len()
        ));

        if self.rows.is_empty() {
            let empty = Paragraph::new("No matching tasks")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = self
            .rows
            .iter()
            .filter_map(|&row| {
                let (id, done, text, indent) = match row {
                    ListRow::Task(id) => {
                        let t = self.store.get(id)?;
                        (t.id, t.done, t.text.as_str(), "")
                    }
                    ListRow::Subtask { parent, id } => {
                        let st = self.store.get(parent)?.subtask(id)?;
                        (st.id, st.done, st.text.as_str(), "    ")
                    }
                };
                let style = match (done, row) {
                    (true, _) => Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                    (false, ListRow::Subtask { .. }) => Style::default().fg(SOFT_BLUE),
                    (false, ListRow::Task(_)) => Style::default().fg(Color::White),
                };
                Some(
                    Row::new(vec![
                        Cell::from(id.to_string()),
                        Cell::from(format!("{indent}{} {text}", check_mark(done))),
                    ])
                    .style(style),
                )
            })
            .collect();

        let header = Row::new(["ID", "Task"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(DARK_GREEN).fg(Color::White))
        .height(1);

        let widths = [Constraint::Length(6), Constraint::Min(20)];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect) {
        let title = match self.state {
            AppState::Keyword => "Keyword filter (Enter to keep, Esc to cancel)".to_string(),
            AppState::AddTask => "New task (Enter to add, Esc to cancel)".to_string(),
            AppState::AddSubtask(parent) => {
                let parent_text = self.row_text(ListRow::Task(parent)).unwrap_or("?");
                format!("New subtask of '{parent_text}' (Enter to add, Esc to cancel)")
            }
            _ => return,
        };
        let prompt = Paragraph::new(self.input.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GOLD))
                .title(title),
        );
        f.render_widget(prompt, area);
        f.set_cursor_position(prompt_cursor(area, self.input.display_column()));
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);
        let lines = vec![
            Line::from("Up/Down    move selection"),
            Line::from("Space      toggle done"),
            Line::from("a          add task"),
            Line::from("s          add subtask to selected task"),
            Line::from("d          delete selected row"),
            Line::from("/          edit keyword filter"),
            Line::from("c          show/hide completed tasks"),
            Line::from("q, Esc     quit"),
            Line::from(""),
            Line::from("A task with subtasks is done when all its subtasks are."),
        ];
        let help = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });
        f.render_widget(help, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let target = self
            .confirm_target
            .and_then(|row| {
                let kind = match row {
                    ListRow::Task(_) => "task",
                    ListRow::Subtask { .. } => "subtask",
                };
                self.row_text(row).map(|text| format!("Delete {kind} '{text}'?"))
            })
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                target,
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            format!(
                "Tasks: {} | Subtasks: {} | Press 'h' for help",
                self.store.len(),
                self.store.subtask_count()
            )
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(DARK_GREEN).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render(&mut self, f: &mut Frame) {
        let prompt_height = match self.state {
            AppState::Keyword | AppState::AddTask | AppState::AddSubtask(_) => 3,
            _ => 0,
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(prompt_height),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_task_list(f, chunks[1]);
        self.render_prompt(f, chunks[2]);
        match self.state {
            AppState::Help => self.render_help(f, chunks[1]),
            AppState::Confirm => self.render_confirm(f, chunks[1]),
            _ => {}
        }
        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                info!(
                    tasks = self.store.len(),
                    subtasks = self.store.subtask_count(),
                    "quitting"
                );
                break;
            }
        }
        Ok(())
    }
}
