//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate};

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, Notice, ViewMode};
use crate::calendar::{day_key, shift_month};
use crate::transfer::{export_data, import_file};

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::SwitchView(view) => self.switch_view(view),
            Action::NextView => self.switch_view(self.view.next()),

            Action::MoveUp => self.move_vertical(-1),
            Action::MoveDown => self.move_vertical(1),
            Action::MoveLeft => self.move_horizontal(-1),
            Action::MoveRight => self.move_horizontal(1),
            Action::PrevPeriod => self.shift_period(-1),
            Action::NextPeriod => self.shift_period(1),
            Action::JumpToday => self.jump_today(),

            Action::Toggle => self.toggle_selected(),
            Action::StartAdd => self.start_add(),
            Action::StartDelete => self.start_delete(),
            Action::StartEditFocus => self.start_edit_focus(),
            Action::Export => self.export(),
            Action::StartImport => self.start_import(),

            Action::Cancel => self.cancel(),
            Action::Submit => self.submit(),

            Action::Input(c) => {
                if self.mode.is_text_input() {
                    self.input_buffer.push(c);
                }
            }
            Action::DeleteChar => {
                if self.mode.is_text_input() {
                    self.input_buffer.pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    fn switch_view(&mut self, view: ViewMode) {
        self.view = view;
        self.message = None;
    }

    fn move_vertical(&mut self, delta: i64) {
        match self.view {
            ViewMode::Dashboard => {
                let len = self.today_tasks().len();
                self.dashboard_task = step(self.dashboard_task, delta, len);
            }
            ViewMode::Weekly => {
                let len = self.selected_day_tasks().len();
                self.selected_task = step(self.selected_task, delta, len);
            }
            ViewMode::Monthly => self.move_month_cursor(Duration::weeks(delta)),
            ViewMode::Habits => {
                self.selected_habit = step(self.selected_habit, delta, self.data.habits.len());
            }
        }
    }

    fn move_horizontal(&mut self, delta: i64) {
        match self.view {
            ViewMode::Weekly => {
                self.selected_day = step(self.selected_day, delta, 7);
                self.selected_task = 0;
            }
            ViewMode::Monthly => self.move_month_cursor(Duration::days(delta)),
            ViewMode::Habits => self.habit_day = step(self.habit_day, delta, 7),
            ViewMode::Dashboard => {}
        }
    }

    fn move_month_cursor(&mut self, delta: Duration) {
        if let Some(date) = self.month_cursor.checked_add_signed(delta) {
            self.month_cursor = date;
        }
    }

    /// 切换到上/下一周或上/下一月
    fn shift_period(&mut self, delta: i64) {
        match self.view {
            ViewMode::Weekly => {
                self.week_offset += delta;
                self.selected_task = 0;
            }
            ViewMode::Habits => self.habit_week_offset += delta,
            ViewMode::Monthly => {
                let (year, month) =
                    shift_month(self.month_cursor.year(), self.month_cursor.month(), delta as i32);
                self.month_cursor = clamp_day(year, month, self.month_cursor.day());
            }
            ViewMode::Dashboard => {}
        }
    }

    fn jump_today(&mut self) {
        let weekday = self.today.weekday().num_days_from_monday() as usize;
        match self.view {
            ViewMode::Weekly => {
                self.week_offset = 0;
                self.selected_day = weekday;
                self.selected_task = 0;
            }
            ViewMode::Habits => {
                self.habit_week_offset = 0;
                self.habit_day = weekday;
            }
            ViewMode::Monthly => self.month_cursor = self.today,
            ViewMode::Dashboard => {}
        }
    }

    // ============ 任务 / 习惯 ============

    fn toggle_selected(&mut self) {
        match self.view {
            ViewMode::Dashboard => {
                let id = self
                    .today_tasks()
                    .get(self.dashboard_task)
                    .map(|t| t.id.clone());
                if let Some(id) = id {
                    self.update(|data| data.toggle_task(&id));
                }
            }
            ViewMode::Weekly => {
                if let Some(id) = self.selected_task_id() {
                    self.update(|data| data.toggle_task(&id));
                }
            }
            ViewMode::Habits => {
                if let Some(id) = self.selected_habit().map(|h| h.id.clone()) {
                    let day = day_key(self.habit_week()[self.habit_day]);
                    self.update(|data| data.toggle_habit_completion(&id, &day));
                }
            }
            ViewMode::Monthly => {}
        }
    }

    /// 当前视图下“选中的日期”
    fn focused_day(&self) -> String {
        match self.view {
            ViewMode::Weekly => self.selected_day_key(),
            ViewMode::Monthly => day_key(self.month_cursor),
            ViewMode::Dashboard | ViewMode::Habits => self.today_key(),
        }
    }

    fn start_add(&mut self) {
        self.input_buffer.clear();
        self.mode = match self.view {
            ViewMode::Habits => AppMode::AddingHabit,
            _ => AppMode::AddingTask(self.focused_day()),
        };
    }

    fn start_delete(&mut self) {
        match self.view {
            ViewMode::Weekly => {
                if let Some(id) = self.selected_task_id() {
                    self.update(|data| data.delete_task(&id));
                    self.message = Some("Task removed".to_string());
                }
            }
            ViewMode::Habits => {
                if let Some(id) = self.selected_habit().map(|h| h.id.clone()) {
                    self.mode = AppMode::Confirm(ConfirmAction::DeleteHabit(id));
                }
            }
            ViewMode::Dashboard | ViewMode::Monthly => {}
        }
    }

    fn start_edit_focus(&mut self) {
        if self.view == ViewMode::Habits {
            return;
        }
        let day = self.focused_day();
        self.input_buffer = self.data.focus_on(&day).unwrap_or_default().to_string();
        self.mode = AppMode::EditingFocus(day);
    }

    // ============ 导入导出 ============

    fn export(&mut self) {
        if self.view != ViewMode::Habits {
            return;
        }
        let notice = match export_data(&self.data, &self.export_dir, self.today) {
            Ok(path) => Notice {
                title: "Export".to_string(),
                body: format!("Backup written to {}", path.display()),
            },
            Err(e) => Notice {
                title: "Export failed".to_string(),
                body: e.to_string(),
            },
        };
        self.mode = AppMode::Notice(notice);
    }

    fn start_import(&mut self) {
        if self.view != ViewMode::Habits {
            return;
        }
        self.input_buffer.clear();
        self.mode = AppMode::ImportPath;
    }

    /// 导入失败时数据保持不变
    fn confirm_import(&mut self) {
        let path = expand_home(self.input_buffer.trim());
        let notice = match import_file(&path) {
            Ok(data) => {
                self.replace_data(data);
                Notice {
                    title: "Import".to_string(),
                    body: "Data successfully imported!".to_string(),
                }
            }
            Err(e) => Notice {
                title: "Import failed".to_string(),
                body: format!("{}\n\n{}", e.user_message(), e),
            },
        };
        self.mode = AppMode::Notice(notice);
        self.input_buffer.clear();
    }

    // ============ 表单提交 ============

    fn submit(&mut self) {
        let mode = std::mem::replace(&mut self.mode, AppMode::Normal);
        match mode {
            AppMode::AddingTask(day) => {
                let text = self.input_buffer.trim().to_string();
                if !text.is_empty() {
                    self.update(|data| {
                        data.add_task(&text, day);
                    });
                    self.message = Some("Task added".to_string());
                }
            }
            AppMode::EditingFocus(day) => {
                let text = self.input_buffer.clone();
                self.update(|data| data.set_focus(&day, &text));
                self.message = Some("Focus updated".to_string());
            }
            AppMode::AddingHabit => {
                let name = self.input_buffer.trim().to_string();
                if !name.is_empty() {
                    self.update(|data| {
                        data.add_habit(&name);
                    });
                    self.message = Some("Habit added".to_string());
                }
            }
            AppMode::ImportPath => {
                self.confirm_import();
                return;
            }
            AppMode::Confirm(ConfirmAction::DeleteHabit(id)) => {
                self.update(|data| data.delete_habit(&id));
                self.message = Some("Habit deleted".to_string());
            }
            AppMode::Notice(_) | AppMode::Normal => {}
        }
        self.input_buffer.clear();
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
        self.message = None;
    }
}

/// 在 [0, len) 内移动索引
fn step(index: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as i64 + delta).clamp(0, len as i64 - 1) as usize
}

/// 月份切换时把日期限制在该月天数内
fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .unwrap_or(NaiveDate::MIN)
}

fn expand_home(input: &str) -> PathBuf {
    match (input.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;
    use crate::storage::{MemoryStore, load_data};

    fn today() -> NaiveDate {
        // 周三
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    }

    fn app_with(data: AppData) -> App {
        App::new(
            data,
            Box::new(MemoryStore::default()),
            today(),
            std::env::temp_dir(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_add_task_in_weekly_view_persists() {
        let mut app = app_with(AppData::default());
        app.dispatch(Action::SwitchView(ViewMode::Weekly));
        assert_eq!(app.selected_day, 2);

        app.dispatch(Action::MoveRight);
        app.dispatch(Action::StartAdd);
        assert_eq!(app.mode, AppMode::AddingTask("2024-06-06".to_string()));
        type_text(&mut app, "Dentist");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.data.tasks.len(), 1);
        assert_eq!(app.data.tasks[0].date, "2024-06-06");
        assert_eq!(load_data(app.store(), false).unwrap(), app.data);
    }

    #[test]
    fn test_blank_task_is_ignored() {
        let mut app = app_with(AppData::default());
        app.dispatch(Action::StartAdd);
        type_text(&mut app, "   ");
        app.dispatch(Action::Submit);
        assert!(app.data.tasks.is_empty());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_toggle_and_delete_task() {
        let mut data = AppData::default();
        data.add_task("a", "2024-06-05".to_string());
        data.add_task("b", "2024-06-05".to_string());
        let mut app = app_with(data);
        app.dispatch(Action::SwitchView(ViewMode::Weekly));

        app.dispatch(Action::MoveDown);
        app.dispatch(Action::Toggle);
        assert!(app.data.tasks[1].completed);

        app.dispatch(Action::StartDelete);
        assert_eq!(app.data.tasks.len(), 1);
        assert_eq!(app.selected_task, 0);
    }

    #[test]
    fn test_week_navigation() {
        let mut app = app_with(AppData::default());
        app.dispatch(Action::SwitchView(ViewMode::Weekly));
        app.dispatch(Action::PrevPeriod);
        assert_eq!(app.selected_day_key(), "2024-05-29");
        app.dispatch(Action::JumpToday);
        assert_eq!(app.selected_day_key(), "2024-06-05");
    }

    #[test]
    fn test_habit_toggle_and_confirm_delete() {
        let mut app = app_with(AppData::seeded());
        app.dispatch(Action::SwitchView(ViewMode::Habits));
        app.dispatch(Action::Toggle);
        assert!(app.data.habits[0].is_done_on("2024-06-05"));

        let before = app.data.habits.len();
        app.dispatch(Action::StartDelete);
        assert!(matches!(app.mode, AppMode::Confirm(_)));
        app.dispatch(Action::Cancel);
        assert_eq!(app.data.habits.len(), before);

        app.dispatch(Action::StartDelete);
        app.dispatch(Action::Submit);
        assert_eq!(app.data.habits.len(), before - 1);
        assert_eq!(app.data.habits[0].name, "Read 20 Pages");
    }

    #[test]
    fn test_edit_focus_prefills() {
        let mut data = AppData::default();
        data.set_focus("2024-06-05", "deep work");
        let mut app = app_with(data);

        app.dispatch(Action::StartEditFocus);
        assert_eq!(app.input_buffer, "deep work");
        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::Submit);
        assert_eq!(app.data.focus_on("2024-06-05"), Some("deep wor"));
    }

    #[test]
    fn test_month_navigation_clamps_day() {
        let mut app = app_with(AppData::default());
        app.dispatch(Action::SwitchView(ViewMode::Monthly));
        app.month_cursor = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        app.dispatch(Action::NextPeriod);
        assert_eq!(app.month_cursor, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        app.dispatch(Action::MoveDown);
        assert_eq!(app.month_cursor, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    }

    #[test]
    fn test_import_invalid_leaves_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"tasks": []}"#).unwrap();

        let mut app = app_with(AppData::seeded());
        let before = app.data.clone();
        app.dispatch(Action::SwitchView(ViewMode::Habits));
        app.dispatch(Action::StartImport);
        type_text(&mut app, &path.display().to_string());
        app.dispatch(Action::Submit);

        assert_eq!(app.data, before);
        match &app.mode {
            AppMode::Notice(notice) => assert!(notice.body.starts_with("Invalid data format.")),
            other => panic!("unexpected mode {:?}", other),
        }
        app.dispatch(Action::Submit);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_import_malformed_leaves_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.json");
        std::fs::write(&path, r#"{"tasks": ["#).unwrap();

        let mut app = app_with(AppData::seeded());
        let before = app.data.clone();
        app.dispatch(Action::SwitchView(ViewMode::Habits));
        app.dispatch(Action::StartImport);
        type_text(&mut app, &path.display().to_string());
        app.dispatch(Action::Submit);

        assert_eq!(app.data, before);
        let stored = crate::storage::KeyValueStore::get(app.store(), crate::storage::STORAGE_KEY).unwrap();
        assert_eq!(stored, None);
        match &app.mode {
            AppMode::Notice(notice) => assert!(notice.body.starts_with("Error reading file.")),
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_midnight_rollover_moves_week() {
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut data = AppData::default();
        let id = data.add_task("new week", "2024-06-10".to_string());
        data.toggle_task(&id);

        let mut app = App::new(
            data,
            Box::new(MemoryStore::default()),
            sunday,
            std::env::temp_dir(),
        );
        assert_eq!(app.weekly_progress(), 0.0);

        app.set_today(monday);
        assert_eq!(app.today_key(), "2024-06-10");
        assert_eq!(app.month_cursor, monday);
        assert_eq!(app.week_stats().tasks_done, 1);
        assert_eq!(app.weekly_progress(), 100.0);

        app.dispatch(Action::StartAdd);
        assert_eq!(app.mode, AppMode::AddingTask("2024-06-10".to_string()));
    }

    #[test]
    fn test_export_then_import_replaces_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = AppData::seeded();
        source.add_task("from backup", "2024-06-05".to_string());
        let path = export_data(&source, dir.path(), today()).unwrap();

        let mut app = app_with(AppData::default());
        app.dispatch(Action::SwitchView(ViewMode::Habits));
        app.dispatch(Action::StartImport);
        type_text(&mut app, &path.display().to_string());
        app.dispatch(Action::Submit);

        assert_eq!(app.data, source);
        assert_eq!(load_data(app.store(), false).unwrap(), source);
        assert!(matches!(app.mode, AppMode::Notice(_)));
    }

    #[test]
    fn test_export_writes_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(AppData::seeded());
        app.export_dir = dir.path().to_path_buf();
        app.dispatch(Action::SwitchView(ViewMode::Habits));
        app.dispatch(Action::Export);
        assert!(dir.path().join("zenplan-backup-2024-06-05.json").exists());
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(2, 1, 3), 2);
        assert_eq!(step(5, 1, 0), 0);
    }
}
