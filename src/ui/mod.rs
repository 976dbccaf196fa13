//! 终端界面：侧边栏 + 仪表盘 / 月视图 / 周计划 / 习惯管理
//!
//! MVI 结构：
//! - Model (state.rs): App 持有整份数据与各视图的选中状态
//! - View (view/): 只读渲染
//! - Intent (actions.rs, input.rs): 按键 -> Action，由 logic.rs 分发并写回存储

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

// Re-export for convenience
pub use input::handle_key_event;
pub use state::App;
pub use view::render;
