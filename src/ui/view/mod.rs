//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod dashboard;
pub mod habits;
pub mod layouts;
pub mod monthly;
pub mod sidebar;
pub mod weekly;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::state::{App, AppMode, ConfirmAction, Notice, ViewMode};
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // 侧边栏
            Constraint::Min(40),    // 内容
        ])
        .split(frame.area());

    sidebar::render_sidebar(frame, app, columns[0]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // 视图
            Constraint::Length(3), // 帮助
        ])
        .split(columns[1]);

    match app.view {
        ViewMode::Dashboard => dashboard::render_dashboard(frame, app, chunks[0]),
        ViewMode::Monthly => monthly::render_monthly(frame, app, chunks[0]),
        ViewMode::Weekly => weekly::render_weekly(frame, app, chunks[0]),
        ViewMode::Habits => habits::render_habits(frame, app, chunks[0]),
    }
    render_help(frame, app, chunks[1]);

    // 渲染弹窗
    match &app.mode {
        AppMode::AddingTask(day) => {
            render_text_dialog(frame, app, &format!("New task for {}", day), "Task")
        }
        AppMode::EditingFocus(day) => {
            render_text_dialog(frame, app, &format!("Focus for {}", day), "Focus")
        }
        AppMode::AddingHabit => render_text_dialog(frame, app, "Add Habit", "e.g. Meditation, Deep Work..."),
        AppMode::ImportPath => render_text_dialog(frame, app, "Import Backup", "Path to .json file"),
        AppMode::Confirm(action) => render_confirm_dialog(frame, app, action),
        AppMode::Notice(notice) => render_notice_dialog(frame, notice),
        AppMode::Normal => {}
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => match app.view {
            ViewMode::Dashboard => "[j/k] select  [space] done  [a] add task  [f] focus  [1-4/Tab] views  [q] quit",
            ViewMode::Weekly => {
                "[h/l] day  [j/k] task  [space] done  [a] add  [d] delete  [f] focus  [[/]] week  [t] today  [q] quit"
            }
            ViewMode::Monthly => "[h/j/k/l] day  [[/]] month  [t] today  [a] add task  [f] focus  [q] quit",
            ViewMode::Habits => {
                "[j/k] habit  [h/l] day  [space] check  [[/]] week  [a] add  [d] delete  [e] export  [i] import  [q] quit"
            }
        },
        AppMode::AddingTask(_) | AppMode::EditingFocus(_) | AppMode::AddingHabit | AppMode::ImportPath => {
            "[Enter] save  [Esc] cancel"
        }
        AppMode::Confirm(_) => "[y] confirm  [n] cancel",
        AppMode::Notice(_) => "[Enter] close",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_text_dialog(frame: &mut Frame, app: &App, title: &str, field: &str) {
    let area = centered_rect(60, 30, frame.area());
    let inner = render_dialog_framework(frame, area, title);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        field,
        &app.input_buffer,
        true,
        Color::Yellow,
    );

    let hint = Paragraph::new("Enter to save, Esc to cancel").style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, chunks[1]);
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::DeleteHabit(id) => {
            let name = app
                .data
                .habits
                .iter()
                .find(|h| &h.id == id)
                .map(|h| h.name.as_str())
                .unwrap_or("this habit");
            format!("Delete \"{}\" and all its check-ins?", name)
        }
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] confirm  [n] cancel", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Confirm").borders(Borders::ALL));

    frame.render_widget(dialog, area);
}

fn render_notice_dialog(frame: &mut Frame, notice: &Notice) {
    let area = centered_rect(60, 30, frame.area());
    let inner = render_dialog_framework(frame, area, &notice.title);

    let body = Paragraph::new(format!("{}\n\n[Enter] OK", notice.body))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}
