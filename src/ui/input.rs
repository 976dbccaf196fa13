//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode, ViewMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('1') => Some(Action::SwitchView(ViewMode::Dashboard)),
            KeyCode::Char('2') => Some(Action::SwitchView(ViewMode::Monthly)),
            KeyCode::Char('3') => Some(Action::SwitchView(ViewMode::Weekly)),
            KeyCode::Char('4') => Some(Action::SwitchView(ViewMode::Habits)),
            KeyCode::Tab => Some(Action::NextView),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::MoveRight),
            KeyCode::Char('[') => Some(Action::PrevPeriod),
            KeyCode::Char(']') => Some(Action::NextPeriod),
            KeyCode::Char('t') => Some(Action::JumpToday),
            KeyCode::Char(' ') | KeyCode::Char('x') => Some(Action::Toggle),
            KeyCode::Char('a') => Some(Action::StartAdd),
            KeyCode::Char('d') => Some(Action::StartDelete),
            KeyCode::Char('f') => Some(Action::StartEditFocus),
            KeyCode::Char('e') => Some(Action::Export),
            KeyCode::Char('i') => Some(Action::StartImport),
            _ => None,
        },
        AppMode::AddingTask(_)
        | AppMode::EditingFocus(_)
        | AppMode::AddingHabit
        | AppMode::ImportPath => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Submit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Notice(_) => match key {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
