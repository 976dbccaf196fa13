//! 周进度聚合
//!
//! 纯函数：只依赖 (今天, 任务, 习惯)。

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar::{day_key, week_of};
use crate::models::{DayKey, Habit, Task};

/// 本周的 7 个日期键（周一..周日）
pub fn week_dates(today: NaiveDate) -> [DayKey; 7] {
    week_of(today, 0).map(day_key)
}

/// 本周统计
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekStats {
    pub tasks_done: usize,
    pub tasks_total: usize,
    pub habits_done: usize,
    pub habit_slots: usize,
}

impl WeekStats {
    pub fn compute(week: &[DayKey], tasks: &[Task], habits: &[Habit]) -> Self {
        let in_week = |d: &str| week.iter().any(|w| w == d);

        let weekly_tasks: Vec<&Task> = tasks.iter().filter(|t| in_week(&t.date)).collect();

        // 同一习惯同一天只计一次，保证结果不超过 100
        let habits_done = habits
            .iter()
            .map(|h| {
                h.completions
                    .iter()
                    .filter(|d| in_week(d))
                    .collect::<HashSet<_>>()
                    .len()
            })
            .sum();

        Self {
            tasks_done: weekly_tasks.iter().filter(|t| t.completed).count(),
            tasks_total: weekly_tasks.len(),
            habits_done,
            habit_slots: habits.len() * week.len(),
        }
    }

    pub fn percent(&self) -> f64 {
        let total = self.tasks_total + self.habit_slots;
        if total == 0 {
            return 0.0;
        }
        (self.tasks_done + self.habits_done) as f64 / total as f64 * 100.0
    }
}

/// 本周完成度 (0..=100)
pub fn weekly_progress(today: NaiveDate, tasks: &[Task], habits: &[Habit]) -> f64 {
    WeekStats::compute(&week_dates(today), tasks, habits).percent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(weekly_progress(date(2024, 6, 5), &[], &[]), 0.0);

        // 只有其他周的任务
        let mut data = AppData::default();
        data.add_task("old", "2024-05-01".to_string());
        assert_eq!(weekly_progress(date(2024, 6, 5), &data.tasks, &[]), 0.0);
    }

    #[test]
    fn test_reference_week() {
        let mut data = AppData::default();
        let days = ["2024-06-03", "2024-06-04", "2024-06-05", "2024-06-07", "2024-06-09"];
        for (i, day) in days.iter().enumerate() {
            let id = data.add_task(&format!("task {}", i), day.to_string());
            if i < 3 {
                data.toggle_task(&id);
            }
        }
        // 不在本周的任务不计入
        data.add_task("next week", "2024-06-10".to_string());

        for name in ["Read", "Run"] {
            let id = data.add_habit(name);
            data.toggle_habit_completion(&id, "2024-06-04");
            data.toggle_habit_completion(&id, "2024-06-08");
            data.toggle_habit_completion(&id, "2024-06-01");
        }

        let stats = WeekStats::compute(&week_dates(date(2024, 6, 6)), &data.tasks, &data.habits);
        assert_eq!(
            stats,
            WeekStats {
                tasks_done: 3,
                tasks_total: 5,
                habits_done: 4,
                habit_slots: 14,
            }
        );

        let expected = 7.0 / 19.0 * 100.0;
        // 周日仍属于同一周
        for today in [date(2024, 6, 3), date(2024, 6, 9)] {
            let p = weekly_progress(today, &data.tasks, &data.habits);
            assert!((p - expected).abs() < 1e-9);
            assert!((p - 36.84).abs() < 0.01);
        }
    }

    #[test]
    fn test_duplicate_completions_stay_bounded() {
        let habit = Habit {
            id: "h".to_string(),
            name: "dup".to_string(),
            completions: vec!["2024-06-03".to_string(); 20],
        };
        let p = weekly_progress(date(2024, 6, 3), &[], &[habit]);
        assert!((p - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds() {
        let mut data = AppData::default();
        let id = data.add_habit("All week");
        for day in week_dates(date(2024, 6, 3)) {
            data.toggle_habit_completion(&id, &day);
            let t = data.add_task("t", day);
            data.toggle_task(&t);
        }
        let p = weekly_progress(date(2024, 6, 3), &data.tasks, &data.habits);
        assert!((p - 100.0).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&p));
    }
}
