//! 仪表盘：今日焦点、今日任务、本周概览

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::components::{check_mark, tick_mark};
use crate::calendar::{day_key, week_of};
use crate::ui::state::App;

pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 日期
            Constraint::Length(4), // 焦点
            Constraint::Min(6),    // 任务 + 概览
        ])
        .split(area);

    let header = Paragraph::new(app.today.format("Today: %A, %B %-d, %Y").to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let today = app.today_key();
    let focus = app
        .data
        .focus_on(&today)
        .unwrap_or("No focus set. Press [f] to write one.");
    frame.render_widget(
        Paragraph::new(focus)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Daily focus").borders(Borders::ALL)),
        chunks[1],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_today_tasks(frame, app, body[0]);
    render_week_overview(frame, app, body[1]);
}

fn render_today_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.today_tasks();
    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new("Nothing planned today. Press [a] to add a task.")
            .style(Style::default().fg(Color::DarkGray))]
    } else {
        tasks
            .iter()
            .map(|task| {
                let style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{} {}", check_mark(task.completed), task.text)).style(style)
            })
            .collect()
    };

    let done = tasks.iter().filter(|t| t.completed).count();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Today's tasks ({}/{})", done, tasks.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !tasks.is_empty() {
        state.select(Some(app.dashboard_task));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_week_overview(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.week_stats();
    let week = week_of(app.today, 0);

    let mut lines = vec![
        Line::from(format!(
            "Tasks   {}/{} done",
            stats.tasks_done, stats.tasks_total
        )),
        Line::from(format!(
            "Habits  {}/{} check-ins",
            stats.habits_done, stats.habit_slots
        )),
        Line::from(Span::styled(
            format!("Overall {:.1}%", stats.percent()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{:<16} M T W T F S S", ""),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    for habit in &app.data.habits {
        let ticks: Vec<&str> = week
            .iter()
            .map(|d| tick_mark(habit.is_done_on(&day_key(*d))))
            .collect();
        lines.push(Line::from(format!(
            "{:<16} {}",
            truncate(&habit.name, 16),
            ticks.join(" ")
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("This week").borders(Borders::ALL)),
        area,
    );
}

/// 按字符截断
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(max.saturating_sub(1)).collect();
        s.push('…');
        s
    }
}
