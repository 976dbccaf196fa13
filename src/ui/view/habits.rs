//! 习惯管理：本周打卡表与数据管理

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use super::components::tick_mark;
use crate::calendar::{DAY_NAMES, day_key};
use crate::ui::state::App;

pub fn render_habits(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(area);

    render_habit_table(frame, app, chunks[0]);

    let data_management = Paragraph::new(format!(
        "Back up your data to a local file or restore from a previous backup.\n\
         [e] Export JSON to {}   [i] Import backup",
        app.export_dir.display()
    ))
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::Gray))
    .block(
        Block::default()
            .title("Data Management")
            .borders(Borders::ALL),
    );
    frame.render_widget(data_management, chunks[1]);
}

fn render_habit_table(frame: &mut Frame, app: &App, area: Rect) {
    let week = app.habit_week();
    let keys: Vec<String> = week.iter().map(|d| day_key(*d)).collect();

    let header_cells = std::iter::once(Cell::from("Habit")).chain(week.iter().enumerate().map(
        |(i, date)| {
            let style = if *date == app.today {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Cell::from(format!("{} {}", &DAY_NAMES[i][..2], date.format("%d"))).style(style)
        },
    ));
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.data.habits.iter().enumerate().map(|(row, habit)| {
        let is_row_selected = row == app.selected_habit;
        let name_style = if is_row_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let ticks = keys.iter().enumerate().map(|(col, key)| {
            let done = habit.is_done_on(key);
            let mut style = if done {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if is_row_selected && col == app.habit_day {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Cell::from(format!(" {}", tick_mark(done))).style(style)
        });

        Row::new(std::iter::once(Cell::from(habit.name.clone()).style(name_style)).chain(ticks))
    });

    let mut widths = vec![Constraint::Min(16)];
    widths.extend([Constraint::Length(6); 7]);

    let title = if app.data.habits.is_empty() {
        "Manage Habits (none yet, press [a] to add)".to_string()
    } else {
        format!(
            "Manage Habits  {} to {}",
            week[0].format("%b %-d"),
            week[6].format("%b %-d")
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}
