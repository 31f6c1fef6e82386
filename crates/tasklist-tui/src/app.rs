use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tasklist_client::{render_page, ClientConfig, LoadState, NoticeKind, Outcome, TaskStore};
use tasklist_service::{ConnectionStatus, HttpService};
use tokio::runtime::{Builder, Runtime};

use crate::components::task_list::TaskList;

/// What the app is currently doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// List navigation
    Normal,
    /// Editing the new-task input
    Input,
    /// Waiting for a yes/no on deleting `id`
    ConfirmDelete { id: i64, prompt: String },
}

pub struct App {
    runtime: Runtime,
    store: TaskStore<HttpService>,
    list: TaskList,
    mode: Mode,
    connection: ConnectionStatus,
}

impl App {
    /// Connect to the API and load the first snapshot. An unreachable server
    /// is not an error here; it shows up in the title bar and list area.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let store = TaskStore::new(config.http_service(), config.api_url.clone());

        let mut app = Self {
            runtime,
            store,
            list: TaskList::new(),
            mode: Mode::Normal,
            connection: ConnectionStatus::Failed("not checked".into()),
        };
        app.reload();
        Ok(app)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn store(&self) -> &TaskStore<HttpService> {
        &self.store
    }

    pub fn connection(&self) -> &ConnectionStatus {
        &self.connection
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.list.selected_id()
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Input)
    }

    /// Ctrl+C always quits; `q` only from the list.
    pub fn should_quit(&self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        key.code == KeyCode::Char('q') && self.mode == Mode::Normal
    }

    /// Drop the notice once it has been up long enough. Returns `true` when
    /// something changed and the screen should be redrawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.store.with_state(|s| s.expire_notice(now))
    }

    /// The page as a standalone HTML document.
    pub fn html(&self) -> String {
        let input = self.store.state().input().to_string();
        render_page(&self.store.page(), &input)
    }

    fn reload(&mut self) {
        self.connection = self
            .runtime
            .block_on(self.store.service().connection_status());
        self.runtime.block_on(self.store.fetch_all());
        self.sync_list();
    }

    fn sync_list(&mut self) {
        self.list.sync(&self.store.page().list);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::Input => self.handle_input(key),
            Mode::ConfirmDelete { id, .. } => self.handle_confirm_delete(key, id),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('i') => self.mode = Mode::Input,
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                if let Some(id) = self.list.selected_id() {
                    self.runtime.block_on(self.store.toggle(id));
                    self.sync_list();
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.list.selected_id() {
                    let prompt = self.store.delete_prompt(id);
                    self.mode = Mode::ConfirmDelete { id, prompt };
                }
            }
            KeyCode::Char('r') => {
                self.reload();
                self.store.with_state(|s| {
                    if s.load_state() == &LoadState::Loaded {
                        s.notify(NoticeKind::Info, "Tasks reloaded");
                    }
                });
            }
            _ => self.list.handle_key(key),
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.runtime.block_on(self.store.submit()) == Outcome::Done {
                    self.sync_list();
                    if let Some(last) = self.store.state().tasks().last() {
                        self.list.select_id(last.id);
                    }
                    self.mode = Mode::Normal;
                }
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => self.store.with_state(|s| {
                let mut input = s.input().to_string();
                input.pop();
                s.set_input(input);
            }),
            KeyCode::Char(c) => self.store.with_state(|s| {
                let mut input = s.input().to_string();
                input.push(c);
                s.set_input(input);
            }),
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent, id: i64) {
        let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
        self.runtime
            .block_on(self.store.delete(id, |_| confirmed));
        self.sync_list();
        self.mode = Mode::Normal;
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let page = self.store.page();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.render_input(frame, layout[1]);
        self.list.render(frame, &page.list, layout[2]);

        let stats = Line::from(vec![
            Span::styled(
                format!(" {}", page.stats.total_label()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" | "),
            Span::styled(page.stats.completed_label(), Style::default().fg(Color::Green)),
        ]);
        frame.render_widget(stats, layout[3]);

        if let Some(notice) = &page.notice {
            let line = Line::from(Span::styled(
                format!(" {}", notice.text),
                notice_style(notice.kind),
            ));
            frame.render_widget(line, layout[4]);
        }

        self.render_hints(frame, layout[5]);

        if let Mode::ConfirmDelete { prompt, .. } = &self.mode {
            render_confirm_delete_dialog(frame, prompt, area);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let status_style = match self.connection {
            ConnectionStatus::Connected => Style::default().fg(Color::Green),
            _ => Style::default().fg(Color::Red),
        };
        let title = Line::from(vec![
            Span::styled(" Todo List ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(self.store.api_url(), Style::default().fg(Color::DarkGray)),
            Span::raw(" | "),
            Span::styled(self.connection.to_string(), status_style),
        ]);
        frame.render_widget(title, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let input = self.store.state().input().to_string();
        let border_style = if self.is_input_mode() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" New task ");

        if self.is_input_mode() {
            frame.set_cursor_position((input_cursor_x(area, &input), area.y.saturating_add(1)));
        }
        frame.render_widget(Paragraph::new(input).block(block), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("j/k", "tasks"),
                ("n", "new"),
                ("space", "toggle"),
                ("d", "del"),
                ("r", "reload"),
            ],
            Mode::Input => vec![("Enter", "add"), ("Esc", "back")],
            Mode::ConfirmDelete { .. } => vec![("y", "confirm"), ("any", "cancel")],
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Yellow).bold()),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }
}

fn render_confirm_delete_dialog(frame: &mut Frame, prompt: &str, area: Rect) {
    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Confirm Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = format!("{prompt}\n\n(y)es / (any key) cancel");
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup);
}

/// Column just past the typed text, clamped inside the input box border.
fn input_cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

fn notice_style(kind: NoticeKind) -> Style {
    match kind {
        NoticeKind::Success => Style::default().fg(Color::Green),
        NoticeKind::Warning => Style::default().fg(Color::Yellow),
        NoticeKind::Error => Style::default().fg(Color::Red).bold(),
        NoticeKind::Info => Style::default().fg(Color::Blue),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
