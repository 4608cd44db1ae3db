//! Interactive roster grid: terminal setup, teardown, and main event loop.

mod app;
mod views;

use std::io::{self, Write};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing::info;

use rc_store::FileStore;

use crate::commands::TuiSession;
use app::App;

/// Launch the TUI on a prepared session.
pub fn run(tui: TuiSession) -> Result<(), String> {
    let mut app = App::new(tui.session, tui.feedback_url);

    let mut stdout = io::stdout();
    enter_screen(&mut stdout, enable_raw_mode, disable_raw_mode)
        .map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            leave_screen(&mut io::stdout());
            return Err(format!("terminal error: {e}"));
        }
    };

    info!("tui started");
    let result = run_loop(&mut terminal, &mut app);

    leave_screen(terminal.backend_mut());
    terminal.show_cursor().ok();
    info!("tui closed");

    result?;
    match app.session.persist_error() {
        Some(e) => Err(format!("state not saved: {e}")),
        None => Ok(()),
    }
}

/// Switch to raw mode and the alternate screen.
///
/// Raw mode is switched back off if the screen cannot be entered.
fn enter_screen<W: Write>(
    out: &mut W,
    enable_raw: impl FnOnce() -> io::Result<()>,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    enable_raw()?;
    if let Err(e) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
        disable_raw().ok();
        return Err(e);
    }
    Ok(())
}

fn leave_screen<W: Write>(out: &mut W) {
    disable_raw_mode().ok();
    execute!(out, LeaveAlternateScreen, DisableMouseCapture).ok();
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStore>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        match event::read().map_err(|e| format!("event error: {e}"))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}
