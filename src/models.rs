use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 日期键 (YYYY-MM-DD)，任务、习惯打卡与每日焦点之间的连接键
pub type DayKey = String;

/// 首次启动时预置的习惯
pub const DEFAULT_HABITS: [&str; 3] = ["Morning Meditation", "Read 20 Pages", "Workout"];

/// 任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub date: DayKey,
}

impl Task {
    pub fn new(text: String, date: DayKey) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
            date,
        }
    }
}

/// 习惯
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completions: Vec<DayKey>, // 已完成的日期
}

impl Habit {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            completions: Vec::new(),
        }
    }

    pub fn is_done_on(&self, day: &str) -> bool {
        self.completions.iter().any(|d| d == day)
    }
}

/// 聚合根：整体序列化、整体持久化
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub daily_focus: BTreeMap<DayKey, String>,
}

impl AppData {
    /// 带默认习惯的初始数据
    pub fn seeded() -> Self {
        Self {
            tasks: Vec::new(),
            habits: DEFAULT_HABITS
                .iter()
                .map(|name| Habit::new(name.to_string()))
                .collect(),
            daily_focus: BTreeMap::new(),
        }
    }

    // ============ 任务 ============

    /// 添加任务，返回新任务 ID
    pub fn add_task(&mut self, text: &str, date: DayKey) -> String {
        let task = Task::new(text.trim().to_string(), date);
        let id = task.id.clone();
        self.tasks.push(task);
        id
    }

    /// 切换任务完成状态
    pub fn toggle_task(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
        }
    }

    pub fn delete_task(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
    }

    /// 某一天的任务（保持插入顺序）
    pub fn tasks_on(&self, day: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == day).collect()
    }

    // ============ 习惯 ============

    /// 添加习惯，返回新习惯 ID
    pub fn add_habit(&mut self, name: &str) -> String {
        let habit = Habit::new(name.trim().to_string());
        let id = habit.id.clone();
        self.habits.push(habit);
        id
    }

    pub fn delete_habit(&mut self, id: &str) {
        self.habits.retain(|h| h.id != id);
    }

    /// 切换习惯在某天的打卡
    pub fn toggle_habit_completion(&mut self, id: &str, day: &str) {
        if let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) {
            if habit.is_done_on(day) {
                habit.completions.retain(|d| d != day);
            } else {
                habit.completions.push(day.to_string());
            }
        }
    }

    // ============ 每日焦点 ============

    /// 写入某天的焦点，空文本则移除
    pub fn set_focus(&mut self, day: &str, text: &str) {
        if text.trim().is_empty() {
            self.daily_focus.remove(day);
        } else {
            self.daily_focus.insert(day.to_string(), text.to_string());
        }
    }

    pub fn focus_on(&self, day: &str) -> Option<&str> {
        self.daily_focus.get(day).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_habits() {
        let data = AppData::seeded();
        assert!(data.tasks.is_empty());
        assert!(data.daily_focus.is_empty());
        let names: Vec<&str> = data.habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, DEFAULT_HABITS);
        assert!(data.habits.iter().all(|h| h.completions.is_empty()));
    }

    #[test]
    fn test_toggle_task_twice() {
        let mut data = AppData::default();
        let id = data.add_task("  Write report ", "2024-06-03".to_string());
        assert_eq!(data.tasks[0].text, "Write report");
        assert!(!data.tasks[0].completed);

        data.toggle_task(&id);
        assert!(data.tasks[0].completed);
        data.toggle_task(&id);
        assert!(!data.tasks[0].completed);
    }

    #[test]
    fn test_delete_task_keeps_order() {
        let mut data = AppData::default();
        data.add_task("a", "2024-06-03".to_string());
        let b = data.add_task("b", "2024-06-03".to_string());
        data.add_task("c", "2024-06-04".to_string());

        data.delete_task(&b);
        let texts: Vec<&str> = data.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
        assert_eq!(data.tasks_on("2024-06-03").len(), 1);
    }

    #[test]
    fn test_add_then_delete_habit() {
        let mut data = AppData::seeded();
        let before = data.habits.clone();

        let id = data.add_habit("Journal");
        assert_eq!(data.habits.len(), before.len() + 1);
        assert_ne!(id, before[0].id);

        data.delete_habit(&id);
        assert_eq!(data.habits, before);
    }

    #[test]
    fn test_toggle_habit_completion() {
        let mut data = AppData::default();
        let id = data.add_habit("Workout");

        data.toggle_habit_completion(&id, "2024-06-05");
        assert!(data.habits[0].is_done_on("2024-06-05"));
        data.toggle_habit_completion(&id, "2024-06-05");
        assert!(!data.habits[0].is_done_on("2024-06-05"));
        assert!(data.habits[0].completions.is_empty());
    }

    #[test]
    fn test_focus_upsert_and_clear() {
        let mut data = AppData::default();
        data.set_focus("2024-06-03", "Ship the release");
        data.set_focus("2024-06-03", "Ship the release, then rest");
        assert_eq!(data.focus_on("2024-06-03"), Some("Ship the release, then rest"));

        data.set_focus("2024-06-03", "   ");
        assert_eq!(data.focus_on("2024-06-03"), None);
    }

    #[test]
    fn test_json_field_names() {
        let mut data = AppData::default();
        data.set_focus("2024-06-03", "focus");
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("dailyFocus").is_some());
        assert!(json.get("tasks").unwrap().is_array());
        assert!(json.get("habits").unwrap().is_array());
    }
}
