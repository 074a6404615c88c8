use jalali_picker::{CalendarSnapshot, DayState, GridCell};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

// ─── Palette ──────────────────────────────────────────────────────────────────

pub fn hex_to_color(hex: &str) -> Color {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 { return Color::Reset; }
    let r = u8::from_str_radix(&h[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&h[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&h[4..6], 16).unwrap_or(0);
    Color::Rgb(r, g, b)
}

const SELECTED_BG: &str = "#2563eb";
const SELECTED_FG: &str = "#ffffff";
const RANGE_BG:    &str = "#dbeafe";
const RANGE_FG:    &str = "#1e3a8a";
const OUTSIDE_FG:  &str = "#9ca3af";
const DISABLED_FG: &str = "#4b5563";
const TODAY_FG:    &str = "#60a5fa";
const BORDER:      &str = "#6b7280";
const ACCENT:      &str = "#93c5fd";

const CELL_WIDTH: u16 = 4;

// ─── Root draw ────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let snap = app.picker.snapshot();

    // Layout: [ field(3) | popover | status_bar(1) ]
    let root = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let width = (CELL_WIDTH * 7 + 2).min(area.width);
    let field = Rect { width: width.max(24).min(area.width), ..root[0] };

    let text = if snap.display.is_empty() {
        Span::styled(snap.placeholder.to_owned(), Style::default().fg(hex_to_color(OUTSIDE_FG)))
    } else {
        Span::raw(snap.display.clone())
    };
    let mut spans = vec![text];
    if snap.show_clear {
        spans.push(Span::styled("  ×", Style::default().fg(hex_to_color(ACCENT))));
    }
    let field_style = if snap.disabled {
        Style::default().fg(hex_to_color(DISABLED_FG))
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .style(field_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(hex_to_color(BORDER))),
            ),
        field,
    );

    if let Some(cal) = &snap.calendar {
        let rows = cal.cells.len() as u16 / 7;
        let popover = Rect {
            width,
            height: (rows + 4).min(root[1].height),
            ..root[1]
        };
        f.render_widget(Clear, popover);
        draw_calendar(f, app, cal, popover);
    }

    draw_statusbar(f, app, root[2]);
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

fn draw_calendar(f: &mut Frame, app: &App, cal: &CalendarSnapshot<'_>, area: Rect) {
    let title = Line::from(Span::styled(
        format!(" ‹ {} › ", cal.title),
        Style::default().fg(hex_to_color(ACCENT)).add_modifier(Modifier::BOLD),
    ));

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(hex_to_color(BORDER)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = vec![];

    // Header row, right to left
    let hdrs: Vec<Span> = cal.weekdays.iter().rev()
        .map(|d| Span::styled(format!(" {d}  "), Style::default().fg(hex_to_color(OUTSIDE_FG)).add_modifier(Modifier::BOLD)))
        .collect();
    lines.push(Line::from(hdrs));

    for (row, week) in cal.weeks().enumerate() {
        let spans: Vec<Span> = week.iter().enumerate().rev().map(|(col, cell)| {
            let index = row * 7 + col;
            match cell {
                GridCell::Placeholder => Span::raw(" ".repeat(CELL_WIDTH as usize)),
                GridCell::Day(day) => {
                    let label = format!(" {:>2} ", cal.day_label(day));
                    Span::styled(label, day_style(cal.day_state(day), index == app.cursor))
                }
            }
        }).collect();
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn day_style(state: DayState, cursor: bool) -> Style {
    let mut style = if state.selected {
        Style::default().bg(hex_to_color(SELECTED_BG)).fg(hex_to_color(SELECTED_FG)).add_modifier(Modifier::BOLD)
    } else if state.in_range {
        Style::default().bg(hex_to_color(RANGE_BG)).fg(hex_to_color(RANGE_FG))
    } else if state.range_start {
        Style::default().fg(hex_to_color(SELECTED_BG)).add_modifier(Modifier::BOLD)
    } else if state.disabled {
        Style::default().fg(hex_to_color(DISABLED_FG)).add_modifier(Modifier::CROSSED_OUT)
    } else if state.outside {
        Style::default().fg(hex_to_color(OUTSIDE_FG))
    } else if state.today {
        Style::default().fg(hex_to_color(TODAY_FG)).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    if cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let help = " ←→↑↓ move  ⏎ pick  [ ] month  o open  c clear  q quit ";
    let line = Line::from(vec![
        Span::styled(help, Style::default().fg(hex_to_color(OUTSIDE_FG))),
        Span::styled(app.status.clone(), Style::default().fg(hex_to_color(ACCENT))),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
