use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use rc_core::StudentId;
use rc_pick::{EngineResult, MULTI_PICK_COUNTS, PickSignal, PickerSession, RosterStatus};
use rc_store::KeyValueStore;

/// Width of one grid tile in columns.
pub const TILE_WIDTH: u16 = 20;

pub struct App<S> {
    pub session: PickerSession<S>,
    pub feedback_url: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,

    // Grid state
    pub cursor: usize,
    pub pick_count: usize,

    // Interrupting notice for rejected picks
    pub notice: Option<String>,
    // Non-interrupting status line message
    pub flash: Option<String>,

    // Layout from the last draw, for navigation and mouse hit-testing
    pub columns: usize,
    pub first_row: usize,
    pub grid_area: Rect,
    pub modal_area: Rect,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: PickerSession<S>, feedback_url: Option<String>) -> Self {
        Self {
            session,
            feedback_url,
            show_help: false,
            should_quit: false,
            cursor: 0,
            pick_count: *MULTI_PICK_COUNTS.start(),
            notice: None,
            flash: None,
            columns: 1,
            first_row: 0,
            grid_area: Rect::default(),
            modal_area: Rect::default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.session.roster_status(), RosterStatus::Ready(_))
    }

    pub fn visible_count(&self) -> usize {
        self.session.visible_students().len()
    }

    /// Id of the tile under the cursor.
    pub fn cursor_id(&self) -> Option<StudentId> {
        self.session
            .visible_students()
            .get(self.cursor)
            .map(|s| s.student_id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.notice = None;
            }
            return;
        }

        if self.session.display().is_open() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q')
            ) {
                self.session.close_display();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Esc => self.show_help = false,
            _ if !self.is_ready() => {}
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-(self.columns as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(self.columns as isize),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor(),
            KeyCode::Char('v') => self.toggle_view(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_count(1),
            KeyCode::Char('-') => self.adjust_count(-1),
            KeyCode::Char('p') => {
                let result = self.session.pick_one();
                self.apply(result);
            }
            KeyCode::Char('m') => {
                let result = self.session.pick_many(self.pick_count);
                self.apply(result);
            }
            KeyCode::Char('a') => {
                let result = self.session.pick_one_from_all();
                self.apply(result);
            }
            KeyCode::Char('A') => {
                let result = self.session.pick_many_from_all(self.pick_count);
                self.apply(result);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.notice.is_some() {
            self.notice = None;
            return;
        }
        if self.session.display().is_open() {
            // Clicking the backdrop dismisses the modal.
            if !contains(self.modal_area, mouse.column, mouse.row) {
                self.session.close_display();
            }
            return;
        }
        if !self.is_ready() {
            return;
        }
        if let Some(index) = self.tile_at(mouse.column, mouse.row) {
            self.cursor = index;
            self.toggle_at_cursor();
        }
    }

    /// Index of the visible tile drawn at a screen position.
    pub fn tile_at(&self, column: u16, row: u16) -> Option<usize> {
        if !contains(self.grid_area, column, row) {
            return None;
        }
        let col = usize::from((column - self.grid_area.x) / TILE_WIDTH);
        if col >= self.columns {
            return None;
        }
        let line = usize::from(row - self.grid_area.y) + self.first_row;
        let index = line * self.columns + col;
        (index < self.visible_count()).then_some(index)
    }

    fn move_by(&mut self, delta: isize) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        let target = self.cursor as isize + delta;
        if (0..count as isize).contains(&target) {
            self.cursor = target as usize;
        }
    }

    fn toggle_at_cursor(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        if let Err(e) = self.session.toggle(id) {
            self.notice = Some(e.to_string());
        }
        self.clamp_cursor();
    }

    fn toggle_view(&mut self) {
        self.session.toggle_view();
        self.cursor = 0;
        self.first_row = 0;
    }

    fn adjust_count(&mut self, delta: isize) {
        let next = (self.pick_count as isize + delta)
            .clamp(*MULTI_PICK_COUNTS.start() as isize, *MULTI_PICK_COUNTS.end() as isize);
        self.pick_count = next as usize;
    }

    fn clamp_cursor(&mut self) {
        let count = self.visible_count();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }

    fn apply(&mut self, result: EngineResult<PickSignal>) {
        self.flash = None;
        match result {
            Ok(PickSignal::NoOp) => self.flash = Some("Nothing to pick.".to_string()),
            Ok(PickSignal::Opened) => {}
            Ok(PickSignal::OpenedClamped {
                requested,
                available,
            }) => {
                self.flash = Some(format!(
                    "Only {available} students available; picked {available} instead of {requested}."
                ));
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
