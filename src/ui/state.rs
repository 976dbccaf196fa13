//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use log::error;

use crate::calendar::{day_key, week_of};
use crate::models::{AppData, DayKey, Habit, Task};
use crate::progress::{WeekStats, week_dates};
use crate::storage::{KeyValueStore, save_data};

/// 侧边栏导航的视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Dashboard,
    Monthly,
    Weekly,
    Habits,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Dashboard,
        ViewMode::Monthly,
        ViewMode::Weekly,
        ViewMode::Habits,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Dashboard => "Dashboard",
            ViewMode::Monthly => "Monthly View",
            ViewMode::Weekly => "Weekly Planner",
            ViewMode::Habits => "Habit Tracker",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    AddingTask(DayKey),
    EditingFocus(DayKey),
    AddingHabit,
    ImportPath,
    Confirm(ConfirmAction),
    Notice(Notice),
}

impl AppMode {
    /// 是否处于文本输入状态
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            AppMode::AddingTask(_) | AppMode::EditingFocus(_) | AppMode::AddingHabit | AppMode::ImportPath
        )
    }
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DeleteHabit(String),
}

/// 需要用户关闭的提示框
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

/// 应用状态
pub struct App {
    pub data: AppData,
    store: Box<dyn KeyValueStore>,
    pub today: NaiveDate,
    pub export_dir: PathBuf,
    pub view: ViewMode,
    pub mode: AppMode,
    pub input_buffer: String,
    pub message: Option<String>,

    pub dashboard_task: usize,

    pub week_offset: i64,
    pub selected_day: usize, // 0 = 周一
    pub selected_task: usize,

    pub month_cursor: NaiveDate,

    pub selected_habit: usize,
    pub habit_week_offset: i64,
    pub habit_day: usize,
}

impl App {
    /// 创建新的应用实例
    pub fn new(
        data: AppData,
        store: Box<dyn KeyValueStore>,
        today: NaiveDate,
        export_dir: PathBuf,
    ) -> Self {
        let weekday = today.weekday().num_days_from_monday() as usize;
        Self {
            data,
            store,
            today,
            export_dir,
            view: ViewMode::Dashboard,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            message: None,
            dashboard_task: 0,
            week_offset: 0,
            selected_day: weekday,
            selected_task: 0,
            month_cursor: today,
            selected_habit: 0,
            habit_week_offset: 0,
            habit_day: weekday,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// 跨过午夜后推进“今天”；停在旧的今天上的月历光标跟着移动
    pub fn set_today(&mut self, today: NaiveDate) {
        if today == self.today {
            return;
        }
        if self.month_cursor == self.today {
            self.month_cursor = today;
        }
        self.today = today;
        self.clamp_selection();
    }

    /// 修改数据并整体写回存储
    pub fn update(&mut self, f: impl FnOnce(&mut AppData)) {
        f(&mut self.data);
        self.persist();
        self.clamp_selection();
    }

    /// 整体替换数据（导入）
    pub fn replace_data(&mut self, data: AppData) {
        self.update(|current| *current = data);
    }

    fn persist(&mut self) {
        if let Err(e) = save_data(self.store.as_mut(), &self.data) {
            error!("event=data_save status=failed error={}", e);
            self.message = Some(format!("Save failed: {}", e));
        }
    }

    /// 删除或导入后修正选中索引
    pub fn clamp_selection(&mut self) {
        fn clamp(index: &mut usize, len: usize) {
            if len == 0 {
                *index = 0;
            } else if *index >= len {
                *index = len - 1;
            }
        }
        let today_len = self.today_tasks().len();
        let day_len = self.selected_day_tasks().len();
        let habit_len = self.data.habits.len();
        clamp(&mut self.dashboard_task, today_len);
        clamp(&mut self.selected_task, day_len);
        clamp(&mut self.selected_habit, habit_len);
    }

    // ============ 派生数据 ============

    pub fn today_key(&self) -> DayKey {
        day_key(self.today)
    }

    pub fn week_stats(&self) -> WeekStats {
        WeekStats::compute(&week_dates(self.today), &self.data.tasks, &self.data.habits)
    }

    pub fn weekly_progress(&self) -> f64 {
        self.week_stats().percent()
    }

    pub fn today_tasks(&self) -> Vec<&Task> {
        self.data.tasks_on(&self.today_key())
    }

    /// 周计划当前显示的 7 天
    pub fn planner_week(&self) -> [NaiveDate; 7] {
        week_of(self.today, self.week_offset)
    }

    pub fn selected_day_key(&self) -> DayKey {
        day_key(self.planner_week()[self.selected_day])
    }

    pub fn selected_day_tasks(&self) -> Vec<&Task> {
        self.data.tasks_on(&self.selected_day_key())
    }

    pub fn selected_task_id(&self) -> Option<String> {
        self.selected_day_tasks()
            .get(self.selected_task)
            .map(|t| t.id.clone())
    }

    /// 习惯页当前显示的 7 天
    pub fn habit_week(&self) -> [NaiveDate; 7] {
        week_of(self.today, self.habit_week_offset)
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        self.data.habits.get(self.selected_habit)
    }
}
