//! 周计划：周一到周日七列，每列显示焦点与任务

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::components::check_mark;
use crate::calendar::{DAY_NAMES, day_key};
use crate::ui::state::App;

pub fn render_weekly(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let week = app.planner_week();
    let relative = match app.week_offset {
        0 => "this week".to_string(),
        -1 => "last week".to_string(),
        1 => "next week".to_string(),
        n => format!("{:+} weeks", n),
    };
    let header = Paragraph::new(format!(
        "{} to {}  ({})",
        week[0].format("%b %-d"),
        week[6].format("%b %-d, %Y"),
        relative
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().title("Weekly Planner").borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(chunks[1]);

    for (i, date) in week.iter().enumerate() {
        let key = day_key(*date);
        let is_selected = i == app.selected_day;
        let is_today = *date == app.today;

        let mut lines = Vec::new();
        let mut selected_line = None;
        if let Some(focus) = app.data.focus_on(&key) {
            lines.push(Line::from(Span::styled(
                focus.to_string(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(""));
        }

        for (j, task) in app.data.tasks_on(&key).iter().enumerate() {
            let mut style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            if is_selected && j == app.selected_task {
                style = style.add_modifier(Modifier::REVERSED);
                selected_line = Some(lines.len());
            }
            lines.push(Line::from(Span::styled(
                format!("{} {}", check_mark(task.completed), task.text),
                style,
            )));
        }

        let border_style = if is_selected {
            Style::default().fg(Color::Yellow)
        } else if is_today {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        // 边框占去上下左右各一格
        let inner_width = columns[i].width.saturating_sub(2) as usize;
        let visible = columns[i].height.saturating_sub(2) as usize;
        let scroll = selected_line.map_or(0, |selected| {
            let rows: Vec<usize> = lines.iter().map(|l| wrapped_rows(l.width(), inner_width)).collect();
            scroll_offset(&rows, selected, visible)
        });

        let title = format!("{} {}", &DAY_NAMES[i][..3], date.format("%m-%d"));
        let column = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0))
            .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(column, columns[i]);
    }
}

/// 一行文字在给定宽度下折成几行
fn wrapped_rows(line_width: usize, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    line_width.div_ceil(width).max(1)
}

/// 让选中行落在可见区域底部以内的最小滚动量
fn scroll_offset(rows: &[usize], selected: usize, visible: usize) -> u16 {
    let end: usize = rows.iter().take(selected + 1).sum();
    end.saturating_sub(visible) as u16
}
