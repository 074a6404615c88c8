use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jalali_picker::format::format_value;
use jalali_picker::{dispatch, DatePickerController, DisplayedMonth, GridCell, Notifier, SelectionValue};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ui::draw;

// ─── App state ────────────────────────────────────────────────────────────────

pub struct App {
    pub picker:  DatePickerController,
    /// Index into the displayed month's grid cells.
    pub cursor:  usize,
    pub status:  String,
    pub running: bool,
}

impl App {
    pub fn new(picker: DatePickerController) -> Self {
        let mut app = Self { picker, cursor: 0, status: String::new(), running: true };
        app.reset_cursor();
        app
    }

    // ── TUI loop ──────────────────────────────────────────────────────────────

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend  = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;

        let result = self.event_loop(&mut term);

        disable_raw_mode()?;
        execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        term.show_cursor()?;
        result
    }

    fn event_loop(&mut self, term: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick = std::time::Duration::from_millis(50);
        while self.running {
            term.draw(|f| draw(f, self))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key);
                    }
                }
            }
        }
        tracing::info!("jcal exiting");
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('o') => {
                let t = self.picker.toggle_open();
                dispatch(&t.effects, self);
            }
            KeyCode::Char('c') => {
                let t = self.picker.clear();
                dispatch(&t.effects, self);
            }
            KeyCode::Char(']') => { self.navigate(1); }
            KeyCode::Char('[') => { self.navigate(-1); }
            // Columns are drawn right to left, so "left" is the next day.
            KeyCode::Left  | KeyCode::Char('h') => self.move_cursor(1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(-1),
            KeyCode::Down  | KeyCode::Char('j') => self.move_cursor(7),
            KeyCode::Up    | KeyCode::Char('k') => self.move_cursor(-7),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => {}
        }
    }

    fn activate(&mut self) {
        if !self.picker.is_open() {
            let t = self.picker.set_open(true);
            dispatch(&t.effects, self);
            return;
        }
        let cell = self.picker.calendar().snapshot().cells.get(self.cursor).copied();
        match cell {
            Some(GridCell::Day(day)) => {
                let t = self.picker.activate_day(day.gregorian);
                if t.is_noop() {
                    self.status = "That day is not available".into();
                }
                dispatch(&t.effects, self);
            }
            _ => self.status = "Nothing to select here".into(),
        }
    }

    /// Returns false when the month is pinned at the end of the supported range.
    fn navigate(&mut self, delta: i32) -> bool {
        let t = self.picker.navigate_month(delta);
        if t.is_noop() {
            return false;
        }
        dispatch(&t.effects, self);
        self.reset_cursor();
        true
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.picker.calendar().snapshot().cells.len();
        let next = self.cursor as isize + delta;
        if next < 0 {
            if self.navigate(-1) {
                self.cursor = self.picker.calendar().snapshot().cells.len().saturating_sub(1);
            }
        } else if next as usize >= len {
            self.navigate(1);
        } else {
            self.cursor = next as usize;
        }
    }

    /// Puts the cursor on day 1 of the displayed month.
    fn reset_cursor(&mut self) {
        self.cursor = self
            .picker
            .calendar()
            .snapshot()
            .cells
            .iter()
            .position(|c| c.day().is_some_and(|d| !d.is_outside_month))
            .unwrap_or(0);
    }
}

impl Notifier for App {
    fn on_change(&mut self, value: &SelectionValue) {
        let text = format_value(value, self.picker.calendar().persian_digits());
        tracing::info!(%text, "selection changed");
        self.status = if text.is_empty() { "Selection cleared".into() } else { format!("Selected {text}") };
    }

    fn on_month_change(&mut self, month: DisplayedMonth) {
        tracing::debug!(%month, "month changed");
    }

    fn on_open_change(&mut self, open: bool) {
        tracing::debug!(open, "picker toggled");
    }
}
