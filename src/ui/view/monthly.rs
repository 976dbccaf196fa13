//! 月视图：月历网格与选中日期详情

use chrono::Datelike;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use super::components::check_mark;
use crate::calendar::{DAY_NAMES, DayStats, day_key, month_grid};
use crate::ui::state::App;

pub fn render_monthly(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(area);

    render_grid(frame, app, chunks[0]);
    render_day_details(frame, app, chunks[1]);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let cursor = app.month_cursor;
    let grid = month_grid(cursor.year(), cursor.month());

    let header = Row::new(DAY_NAMES.iter().map(|name| Cell::from(&name[..3])))
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let rows = grid.iter().map(|week| {
        let cells = week.iter().map(|day| {
            let Some(date) = day else {
                return Cell::from("");
            };
            let stats = DayStats::for_day(&app.data, &day_key(*date));

            let mut text = format!("{:>2}", date.day());
            if stats.has_focus {
                text.push_str(" *");
            }
            let summary = if stats.tasks_total > 0 {
                format!("{}/{}", stats.tasks_done, stats.tasks_total)
            } else {
                String::new()
            };

            let mut style = if stats.tasks_total > 0 && stats.tasks_done == stats.tasks_total {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if *date == app.today {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if *date == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            Cell::from(vec![Line::from(text), Line::from(summary)]).style(style)
        });
        Row::new(cells).height(2)
    });

    let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
        .header(header)
        .block(
            Block::default()
                .title(cursor.format("%B %Y").to_string())
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn render_day_details(frame: &mut Frame, app: &App, area: Rect) {
    let key = day_key(app.month_cursor);

    let mut lines = vec![Line::from(format!(
        "Focus: {}",
        app.data.focus_on(&key).unwrap_or("(none)")
    ))];
    let tasks = app.data.tasks_on(&key);
    if tasks.is_empty() {
        lines.push(Line::from("No tasks"));
    }
    for task in tasks {
        lines.push(Line::from(format!("{} {}", check_mark(task.completed), task.text)));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(app.month_cursor.format("%A, %B %-d").to_string())
            .borders(Borders::ALL),
    );
    frame.render_widget(details, area);
}
