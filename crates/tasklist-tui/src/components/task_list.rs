use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tasklist_client::render::{ListView, RowView, EMPTY_TEXT, LOADING_TEXT};

/// Cursor over the rendered rows. The rows themselves come from the store
/// on every sync, so only the ids and the selection live here.
pub struct TaskList {
    ids: Vec<i64>,
    list_state: ListState,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            list_state: ListState::default(),
        }
    }

    /// Replace the rows, keeping the cursor on the same task when it survives.
    pub fn sync(&mut self, list: &ListView) {
        let selected = self.selected_id();
        self.ids = match list {
            ListView::Rows(rows) => rows.iter().map(|r| r.id).collect(),
            _ => Vec::new(),
        };

        if self.ids.is_empty() {
            self.list_state.select(None);
            return;
        }
        let fallback = self
            .list_state
            .selected()
            .unwrap_or(0)
            .min(self.ids.len() - 1);
        let idx = selected
            .and_then(|id| self.ids.iter().position(|&i| i == id))
            .unwrap_or(fallback);
        self.list_state.select(Some(idx));
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.ids.get(self.list_state.selected()?).copied()
    }

    /// Returns `true` if the task is present and now selected.
    pub fn select_id(&mut self, id: i64) -> bool {
        match self.ids.iter().position(|&i| i == id) {
            Some(idx) => {
                self.list_state.select(Some(idx));
                true
            }
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.ids.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if current + 1 < self.ids.len() {
                    self.list_state.select(Some(current + 1));
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if current > 0 {
                    self.list_state.select(Some(current - 1));
                }
            }
            KeyCode::Char('g') => self.list_state.select(Some(0)),
            KeyCode::Char('G') => self.list_state.select(Some(self.ids.len() - 1)),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, list: &ListView, area: Rect) {
        let block = Block::default()
            .title(" Tasks ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let rows = match list {
            ListView::Rows(rows) => rows,
            ListView::Loading => {
                let p = Paragraph::new(LOADING_TEXT)
                    .block(block)
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(p, area);
                return;
            }
            ListView::Empty => {
                let p = Paragraph::new(EMPTY_TEXT)
                    .block(block)
                    .style(Style::default().fg(Color::DarkGray).italic());
                frame.render_widget(p, area);
                return;
            }
            ListView::Error { message, api_url } => {
                let text = vec![
                    Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
                    Line::from(Span::styled(
                        format!("API: {api_url}"),
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                let p = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
                frame.render_widget(p, area);
                return;
            }
        };

        let items: Vec<ListItem> = rows.iter().map(row_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            .highlight_symbol("> ");

        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn row_item(row: &RowView) -> ListItem<'_> {
    let (mark, style) = if row.completed {
        (
            "[x] ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ] ", Style::default())
    };
    ListItem::new(Line::from(vec![
        Span::styled(mark, Style::default().fg(Color::Green)),
        Span::styled(row.title.as_str(), style),
    ]))
}
