//! Rendering for the picker TUI.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use rc_pick::{PickResult, RosterStatus};
use rc_store::KeyValueStore;

use super::app::{App, TILE_WIDTH};

/// Main draw function.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);

    match app.session.roster_status() {
        RosterStatus::Loading => {
            let p = Paragraph::new("Loading roster...").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(p, chunks[1]);
        }
        RosterStatus::Failed(message) => {
            let message = message.clone();
            draw_failure(frame, app, &message, chunks[1]);
        }
        RosterStatus::Ready(_) => draw_grid(frame, app, chunks[1]),
    }

    draw_status(frame, app, chunks[2]);

    if app.session.display().is_open() {
        draw_result(frame, app);
    } else {
        app.modal_area = Rect::default();
    }
    if let Some(notice) = &app.notice {
        draw_notice(frame, notice);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_title<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let view = if app.session.show_selected() {
        "selected"
    } else {
        "all"
    };
    let line = Line::from(vec![
        Span::styled(" Rollcall ", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw(format!("  view: {view}  ")),
        Span::styled(format!("N = {}", app.pick_count), Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_failure<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, message: &str, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red).bold())),
    ];
    if let Some(url) = &app.feedback_url {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Feedback: {url}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press q to quit.",
        Style::default().fg(Color::DarkGray),
    )));

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(p, area);
}

fn draw_grid<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    app.grid_area = area;
    app.columns = usize::from((area.width / TILE_WIDTH).max(1));

    let students = app.session.visible_students();
    if students.is_empty() {
        let text = if app.session.show_selected() {
            "No students selected. Press v to show everyone."
        } else {
            "The roster is empty."
        };
        let p = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(p, area);
        return;
    }

    // Keep the cursor row on screen.
    let visible_rows = usize::from(area.height.max(1));
    let cursor_row = app.cursor / app.columns;
    let mut first_row = app.first_row;
    if cursor_row < first_row {
        first_row = cursor_row;
    } else if cursor_row >= first_row + visible_rows {
        first_row = cursor_row + 1 - visible_rows;
    }

    let selection = app.session.selection();
    let last = app.session.last_picked();

    // Each tile gets its own fixed-width cell so the drawn geometry matches
    // `App::tile_at` whatever the display width of the names.
    let rows = students
        .chunks(app.columns)
        .enumerate()
        .skip(first_row)
        .take(visible_rows);
    for (line, (row, chunk)) in rows.enumerate() {
        for (col, student) in chunk.iter().enumerate() {
            let index = row * app.columns + col;
            let id = student.student_id;
            let selected = selection.contains(id);
            let mark = if selected { "\u{2713}" } else { " " };
            let star = if last == Some(id) { "\u{2605}" } else { " " };

            let mut style = if selected {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::White)
            };
            if index == app.cursor {
                style = style.bg(Color::DarkGray);
            }

            let tile = Rect {
                x: area.x + TILE_WIDTH * col as u16,
                y: area.y + line as u16,
                width: TILE_WIDTH - 1,
                height: 1,
            };
            let label = Paragraph::new(format!("{mark}{star}{}", student.name)).style(style);
            frame.render_widget(label, tile);
        }
    }

    app.first_row = first_row;
}

fn draw_status<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let base = Style::default().fg(Color::Black).bg(Color::White);
    let line = if let Some(err) = app.session.persist_error() {
        Line::from(Span::styled(
            format!(" state not saved: {err}"),
            Style::default().fg(Color::White).bg(Color::Red),
        ))
    } else if let Some(flash) = &app.flash {
        Line::from(Span::styled(format!(" {flash}"), base.fg(Color::Yellow)))
    } else if app.is_ready() {
        let total = app.session.roster().map_or(0, |r| r.len());
        Line::from(Span::styled(
            format!(
                " {total} students, {} selected | space toggle  p pick  m pick N  a/A from all  +/- N  v view  ? help",
                app.session.selection().len()
            ),
            base,
        ))
    } else {
        Line::from(Span::styled(" q quit  ? help", base))
    };
    frame.render_widget(Paragraph::new(line).style(base), area);
}

fn draw_result<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let Some(result) = app.session.display().result() else {
        return;
    };
    let area = centered_rect(50, 60, frame.area());

    let mut lines = vec![Line::from("")];
    match result {
        PickResult::Single(student) => {
            lines.push(Line::from(Span::styled(
                student.name.clone(),
                Style::default().fg(Color::Green).bold(),
            )));
            lines.push(Line::from(Span::styled(
                student.portrait_image(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        PickResult::Multi(students) if students.is_empty() => {
            lines.push(Line::from(Span::styled(
                "No students to show.",
                Style::default().fg(Color::Yellow),
            )));
        }
        PickResult::Multi(students) => {
            for (i, student) in students.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::raw(format!("{:>2}. ", i + 1)),
                    Span::styled(student.name.clone(), Style::default().fg(Color::Green).bold()),
                ]));
            }
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc / click outside to close",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Today's duty ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
    app.modal_area = area;
}

fn draw_notice(frame: &mut Frame, notice: &str) {
    let area = centered_rect(40, 20, frame.area());
    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(notice.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press Enter", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Notice ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  \u{2190}\u{2191}\u{2192}\u{2193} / hjkl  Move cursor"),
        Line::from("  Space / Enter Toggle student"),
        Line::from("  v             Show all / selected only"),
        Line::from(""),
        Line::from("  p             Pick one from selection"),
        Line::from("  m             Pick N from selection"),
        Line::from("  a             Pick one from everyone"),
        Line::from("  A             Pick N from everyone"),
        Line::from("  + / -         Change N (2-10)"),
        Line::from(""),
        Line::from("  Esc           Close result"),
        Line::from("  ?             Toggle this help"),
        Line::from("  q / Ctrl+C    Quit"),
        Line::from(""),
        Line::from("  Click a tile to toggle it."),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Create a centered rectangle as a percentage of the given area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
