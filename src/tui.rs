//! TUI (Terminal User Interface) module for the trivia board.
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `App`: headless controller state (board, cursor, load bookkeeping)
//! - `BoardTui`: terminal setup, rendering, and the event loop
//!
//! Reveal triggers are routed to the board as explicit
//! `(category_index, clue_index)` pairs taken from the cursor position.
//! Loads run as spawned tasks reporting back over a channel; each load is
//! tagged with a generation number so a superseded fetch can never
//! overwrite a newer game.

use crate::board::{Board, Category, Showing};
use crate::error::Result;
use crate::fetcher::Fetcher;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const LOAD_CHANNEL_CAPACITY: usize = 4;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const STATUS_STYLE: Style = Style::new().fg(Color::Yellow);
const UNSET_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);
const QUESTION_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
const ANSWER_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

/// The start/restart control's three labels. While a load is in flight
/// the control reads LOADING and further start triggers are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartControl {
    Start,
    Loading,
    Restart,
}

impl StartControl {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Loading => "LOADING",
            Self::Restart => "Restart",
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    /// Kick off a load tagged with this generation number.
    StartLoad(u64),
}

/// A completed load: the generation it belongs to and its outcome.
pub type LoadResult = (u64, Result<Vec<Category>>);

/// Controller state, kept free of terminal handles so the control logic
/// can be exercised in tests.
pub struct App {
    board: Board,
    cursor: (usize, usize),
    control: StartControl,
    generation: u64,
    status: String,
    error: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            cursor: (0, 0),
            control: StartControl::Start,
            generation: 0,
            status: "Press S to start a new game".to_string(),
            error: String::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn control(&self) -> StartControl {
        self.control
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    fn is_loading(&self) -> bool {
        self.control == StartControl::Loading
    }

    /// Start/restart trigger. Returns the generation of the new load, or
    /// `None` when a load is already in flight (the trigger is a no-op).
    pub fn start_requested(&mut self) -> Option<u64> {
        if self.is_loading() {
            log::debug!("start ignored, load already in flight");
            return None;
        }
        self.generation += 1;
        self.control = StartControl::Loading;
        self.status = "Fetching categories...".to_string();
        self.error.clear();
        log::info!("load {} started", self.generation);
        Some(self.generation)
    }

    /// A load finished. Results from a superseded generation are dropped
    /// so a stale fetch can never clobber the current game.
    pub fn load_finished(&mut self, generation: u64, result: Result<Vec<Category>>) {
        if generation != self.generation {
            log::debug!(
                "discarding stale load {generation} (current is {})",
                self.generation
            );
            return;
        }
        match result {
            Ok(categories) => {
                self.board.replace(categories);
                self.cursor = (0, 0);
                self.control = StartControl::Restart;
                self.status = "Board ready - reveal clues with ENTER".to_string();
                self.error.clear();
            }
            Err(e) => {
                log::warn!("load {generation} failed: {e}");
                // the board keeps whatever game was showing before
                self.control = if self.board.is_loaded() {
                    StartControl::Restart
                } else {
                    StartControl::Start
                };
                self.status = "Load failed - press S to retry".to_string();
                self.error = format!("Load failed: {e}");
            }
        }
    }

    pub fn move_cursor(&mut self, d_category: isize, d_clue: isize) {
        let categories = self.board.categories().len();
        let clues = self
            .board
            .categories()
            .first()
            .map_or(0, |cat| cat.clues.len());
        if categories == 0 || clues == 0 {
            return;
        }
        let (c, i) = self.cursor;
        self.cursor = (
            (c as isize + d_category).clamp(0, categories as isize - 1) as usize,
            (i as isize + d_clue).clamp(0, clues as isize - 1) as usize,
        );
    }

    /// Reveal trigger for the cell under the cursor.
    pub fn reveal_at_cursor(&mut self) {
        let (category, clue) = self.cursor;
        match self.board.reveal(category, clue) {
            Ok(Some(_)) => {
                let showing = self
                    .board
                    .clue(category, clue)
                    .map(|c| c.showing)
                    .unwrap_or_default();
                self.status = match showing {
                    Showing::Question => "Question shown - ENTER again for the answer".to_string(),
                    Showing::Answer => "Answer shown - cell is done".to_string(),
                    Showing::Unset => String::new(),
                };
            }
            Ok(None) => {
                // already showing the answer; ignore
            }
            Err(e) => {
                // cursor is clamped to board bounds, but surface it anyway
                self.error = e.to_string();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(AppAction::Quit),
            KeyCode::Char('s' | 'S' | 'r' | 'R') => {
                return self.start_requested().map(AppAction::StartLoad);
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                // before the first load, ENTER doubles as the start control
                if !self.board.is_loaded() {
                    return self.start_requested().map(AppAction::StartLoad);
                }
                self.reveal_at_cursor();
            }
            _ => {}
        }
        None
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal front-end: owns the terminal handle and runs the event loop.
pub struct BoardTui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl BoardTui {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Main event loop: draw, drain finished loads, process one input
    /// event at a time. Loads run as spawned tasks so the LOADING state
    /// keeps rendering while a fetch is in flight.
    pub async fn run(&mut self, app: &mut App, fetcher: Fetcher) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<LoadResult>(LOAD_CHANNEL_CAPACITY);

        loop {
            self.draw(app)?;

            while let Ok((generation, result)) = rx.try_recv() {
                app.load_finished(generation, result);
            }

            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Only process Press events, ignore Release and Repeat
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.handle_key(key) {
                Some(AppAction::Quit) => break,
                Some(AppAction::StartLoad(generation)) => {
                    Self::spawn_load(generation, fetcher.clone(), tx.clone());
                }
                None => {}
            }
        }
        Ok(())
    }

    fn spawn_load(generation: u64, fetcher: Fetcher, tx: mpsc::Sender<LoadResult>) {
        tokio::spawn(async move {
            let result = fetcher.fetch_board().await;
            // the receiver may be gone if the user quit mid-load
            let _ = tx.send((generation, result)).await;
        });
    }

    fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|f| Self::render(f, app))?;
        Ok(())
    }

    fn render(f: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(12),   // Board grid
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], app);
        Self::render_status(f, chunks[2], app);
        Self::render_instructions(f, chunks[3], app);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("TRIVIA BOARD")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, app: &App) {
        let block = Block::default().title("Board").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if !app.board().is_loaded() {
            let text = match app.control() {
                StartControl::Loading => "LOADING...",
                _ => "No board yet - press S to start",
            };
            let placeholder = Paragraph::new(text)
                .style(STATUS_STYLE)
                .wrap(Wrap { trim: true });
            f.render_widget(placeholder, inner);
            return;
        }

        let categories = app.board().categories();
        let columns = categories.len() as u16;
        if columns == 0 || inner.width < columns {
            return;
        }
        let cell_width = (inner.width / columns) as usize;

        // Header row: category titles
        let header: Vec<Span> = categories
            .iter()
            .map(|cat| Span::styled(Self::fit(&cat.title, cell_width), HEADER_STYLE))
            .collect();
        Self::render_line(f, inner, inner.y, header);

        // Clue rows
        let rows = categories.first().map_or(0, |cat| cat.clues.len());
        for row in 0..rows {
            let y = inner.y + 1 + (row as u16 * ROW_SPACING);
            if y >= inner.y + inner.height {
                break;
            }
            let mut spans = Vec::with_capacity(categories.len());
            for (col, category) in categories.iter().enumerate() {
                let clue = &category.clues[row];
                let (text, mut style) = match clue.showing {
                    Showing::Unset => ("?".to_string(), UNSET_STYLE),
                    Showing::Question => (clue.question.clone(), QUESTION_STYLE),
                    Showing::Answer => (clue.answer.clone(), ANSWER_STYLE),
                };
                if app.cursor() == (col, row) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(Self::fit(&text, cell_width), style));
            }
            Self::render_line(f, inner, y, spans);
        }
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    /// Pad or truncate `text` to exactly `width` columns, leaving one
    /// column of separation between cells.
    fn fit(text: &str, width: usize) -> String {
        if width < 2 {
            return " ".repeat(width);
        }
        let body_width = width - 1;
        let mut body: String = text.chars().take(body_width).collect();
        while body.chars().count() < body_width {
            body.push(' ');
        }
        body.push(' ');
        body
    }

    fn render_status(f: &mut Frame, area: Rect, app: &App) {
        let (text, style) = if app.error.is_empty() {
            (app.status.clone(), STATUS_STYLE)
        } else {
            (app.error.clone(), ERROR_STYLE)
        };
        let line = format!("[{}] {}", app.control().label(), text);
        let paragraph = Paragraph::new(line)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, app: &App) {
        let text = match app.control() {
            StartControl::Loading => "Loading categories...",
            StartControl::Start => "S: Start | Q: Quit",
            StartControl::Restart => {
                "Arrows/HJKL: Move | ENTER/SPACE: Reveal | S: Restart | Q: Quit"
            }
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl Drop for BoardTui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Clue;
    use crate::error::GameError;
    use crossterm::event::KeyModifiers;

    fn categories(n_cats: usize, n_clues: usize) -> Vec<Category> {
        (0..n_cats)
            .map(|c| Category {
                title: format!("Category {c}"),
                clues: (0..n_clues)
                    .map(|i| Clue::new(format!("Q {c}-{i}"), format!("A {c}-{i}")))
                    .collect(),
            })
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        let generation = app.start_requested().unwrap();
        app.load_finished(generation, Ok(categories(6, 5)));
        app
    }

    #[test]
    fn test_start_control_labels() {
        assert_eq!(StartControl::Start.label(), "Start");
        assert_eq!(StartControl::Loading.label(), "LOADING");
        assert_eq!(StartControl::Restart.label(), "Restart");
    }

    #[test]
    fn test_start_while_loading_is_noop() {
        let mut app = App::new();
        assert_eq!(app.start_requested(), Some(1));
        assert_eq!(app.control(), StartControl::Loading);
        // a second trigger while the first load is in flight does nothing
        assert_eq!(app.start_requested(), None);
        assert_eq!(app.control(), StartControl::Loading);
    }

    #[test]
    fn test_load_success_replaces_board() {
        let mut app = App::new();
        let generation = app.start_requested().unwrap();
        app.load_finished(generation, Ok(categories(6, 5)));

        assert!(app.board().is_loaded());
        assert_eq!(app.board().categories().len(), 6);
        assert_eq!(app.control(), StartControl::Restart);
        assert_eq!(app.cursor(), (0, 0));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut app = App::new();
        let first = app.start_requested().unwrap();
        app.load_finished(first, Ok(categories(6, 5)));
        let second = app.start_requested().unwrap();
        assert!(second > first);

        // a late result from the superseded load arrives after the restart
        let stale = categories(2, 2);
        app.load_finished(first, Ok(stale));
        // the board still holds the first load's 6 categories
        assert_eq!(app.board().categories().len(), 6);

        // the current load lands normally
        app.load_finished(second, Ok(categories(4, 5)));
        assert_eq!(app.board().categories().len(), 4);
    }

    #[test]
    fn test_load_failure_leaves_board_untouched() {
        let mut app = loaded_app();
        app.board().clue(0, 0).unwrap();

        let generation = app.start_requested().unwrap();
        app.load_finished(
            generation,
            Err(GameError::InvalidArgument {
                requested: 5,
                available: 2,
            }),
        );

        // the previous game is still on the board and the control is ready
        assert_eq!(app.board().categories().len(), 6);
        assert_eq!(app.control(), StartControl::Restart);
        assert!(!app.error.is_empty());
    }

    #[test]
    fn test_load_failure_before_first_game_returns_to_start() {
        let mut app = App::new();
        let generation = app.start_requested().unwrap();
        app.load_finished(
            generation,
            Err(GameError::InvalidArgument {
                requested: 6,
                available: 0,
            }),
        );
        assert!(!app.board().is_loaded());
        assert_eq!(app.control(), StartControl::Start);
    }

    #[test]
    fn test_cursor_clamped_to_board() {
        let mut app = loaded_app();
        app.move_cursor(-1, -1);
        assert_eq!(app.cursor(), (0, 0));
        for _ in 0..20 {
            app.move_cursor(1, 1);
        }
        assert_eq!(app.cursor(), (5, 4));
    }

    #[test]
    fn test_cursor_ignored_without_board() {
        let mut app = App::new();
        app.move_cursor(1, 1);
        assert_eq!(app.cursor(), (0, 0));
    }

    #[test]
    fn test_reveal_routes_to_cursor_cell() {
        let mut app = loaded_app();
        app.move_cursor(2, 3);
        app.reveal_at_cursor();
        assert_eq!(app.board().clue(2, 3).unwrap().showing, Showing::Question);
        app.reveal_at_cursor();
        assert_eq!(app.board().clue(2, 3).unwrap().showing, Showing::Answer);
        // terminal state: further triggers change nothing
        app.reveal_at_cursor();
        assert_eq!(app.board().clue(2, 3).unwrap().showing, Showing::Answer);
        // other cells untouched
        assert_eq!(app.board().clue(0, 0).unwrap().showing, Showing::Unset);
    }

    #[test]
    fn test_enter_before_first_load_starts_game() {
        let mut app = App::new();
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(action, Some(AppAction::StartLoad(1)));
        assert_eq!(app.control(), StartControl::Loading);
    }

    #[test]
    fn test_enter_on_loaded_board_reveals() {
        let mut app = loaded_app();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(app.board().clue(0, 0).unwrap().showing, Showing::Question);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Some(AppAction::Quit));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(AppAction::Quit));
    }

    #[test]
    fn test_restart_key_bumps_generation() {
        let mut app = loaded_app();
        let action = app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(action, Some(AppAction::StartLoad(2)));
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(BoardTui::fit("abc", 6), "abc   ");
        assert_eq!(BoardTui::fit("abcdefgh", 6), "abcde ");
        assert_eq!(BoardTui::fit("x", 1), " ");
        assert_eq!(BoardTui::fit("x", 0), "");
    }
}
