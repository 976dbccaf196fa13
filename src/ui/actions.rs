//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use super::state::ViewMode;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SwitchView(ViewMode),
    NextView,

    // 导航
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PrevPeriod, // 上一周 / 上一月
    NextPeriod,
    JumpToday,

    // 触发特定功能
    Toggle,
    StartAdd,
    StartDelete,
    StartEditFocus,
    Export,
    StartImport,

    // 表单/通用交互
    Cancel,      // Esc / n
    Submit,      // Enter / y
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
