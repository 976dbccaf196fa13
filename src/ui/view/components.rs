//! 通用 UI 组件
//!
//! 对话框、输入框、进度条等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    // 末尾的光标
    let text = if is_focused {
        format!("{}▏", value)
    } else {
        value.to_string()
    };

    let input = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 百分比进度条
pub fn render_progress_gauge(frame: &mut Frame, area: Rect, title: &str, percent: f64) {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{:.0}%", percent));
    frame.render_widget(gauge, area);
}

/// 完成标记
pub fn check_mark(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// 习惯打卡格
pub fn tick_mark(done: bool) -> &'static str {
    if done { "●" } else { "○" }
}
