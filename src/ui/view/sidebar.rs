//! 侧边栏：导航与本周进度

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::components::render_progress_gauge;
use crate::ui::state::{App, ViewMode};

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(6),    // 导航
            Constraint::Length(3), // 进度
        ])
        .split(area);

    let title = Paragraph::new("Z  ZenPlan")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = ViewMode::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if *view == app.view {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(view.label(), style),
            ]))
        })
        .collect();

    let nav = List::new(items).block(Block::default().title("Views").borders(Borders::ALL));
    frame.render_widget(nav, chunks[1]);

    render_progress_gauge(frame, chunks[2], "This week", app.weekly_progress());
}
