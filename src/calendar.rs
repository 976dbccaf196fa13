//! 日期与周/月边界计算
//!
//! 周从周一开始（周一偏移 0，周日回退 6 天），不可配置。

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{AppData, DayKey};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn day_key(date: NaiveDate) -> DayKey {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// 所在周的周一
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

/// 以 anchor 所在周为基准，偏移若干周后的 7 天（周一..周日）
pub fn week_of(anchor: NaiveDate, offset_weeks: i64) -> [NaiveDate; 7] {
    let monday = week_start(anchor) + Duration::weeks(offset_weeks);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// 月份偏移，返回 (年, 月)
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// 月历网格：每行一周（周一开头），不属于本月的格子为 None
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut monday = week_start(first);
    loop {
        let row: [Option<NaiveDate>; 7] = std::array::from_fn(|i| {
            let d = monday + Duration::days(i as i64);
            (d.month() == month && d.year() == year).then_some(d)
        });
        if row.iter().all(Option::is_none) {
            break;
        }
        rows.push(row);
        monday += Duration::weeks(1);
    }
    rows
}

/// 单日统计
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayStats {
    pub tasks_total: usize,
    pub tasks_done: usize,
    pub has_focus: bool,
}

impl DayStats {
    pub fn for_day(data: &AppData, day: &str) -> Self {
        let tasks = data.tasks_on(day);
        Self {
            tasks_total: tasks.len(),
            tasks_done: tasks.iter().filter(|t| t.completed).count(),
            has_focus: data.focus_on(day).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_sunday_rolls_back() {
        // 2024-06-09 是周日
        assert_eq!(week_start(date(2024, 6, 9)), date(2024, 6, 3));
        assert_eq!(week_start(date(2024, 6, 3)), date(2024, 6, 3));
        assert_eq!(week_start(date(2024, 6, 5)), date(2024, 6, 3));
    }

    #[test]
    fn test_week_of_offset() {
        let week = week_of(date(2024, 6, 5), -1);
        assert_eq!(week[0], date(2024, 5, 27));
        assert_eq!(week[6], date(2024, 6, 2));
    }

    #[test]
    fn test_day_key_zero_padded() {
        assert_eq!(day_key(date(2024, 1, 7)), "2024-01-07");
        assert_eq!(day_key(date(2024, 12, 31)), "2024-12-31");
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 6, 0), (2024, 6));
        assert_eq!(shift_month(2024, 3, -15), (2022, 12));
    }

    #[test]
    fn test_month_grid() {
        // 2024 年 6 月：1 日是周六，30 日是周日
        let grid = month_grid(2024, 6);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][5], Some(date(2024, 6, 1)));
        assert_eq!(grid[0][0], None);
        assert_eq!(grid[4][6], Some(date(2024, 6, 30)));

        let days: usize = grid.iter().flatten().filter(|d| d.is_some()).count();
        assert_eq!(days, 30);
    }

    #[test]
    fn test_day_stats() {
        let mut data = AppData::default();
        let id = data.add_task("a", "2024-06-03".to_string());
        data.add_task("b", "2024-06-03".to_string());
        data.toggle_task(&id);
        data.set_focus("2024-06-03", "deep work");

        let stats = DayStats::for_day(&data, "2024-06-03");
        assert_eq!(stats.tasks_total, 2);
        assert_eq!(stats.tasks_done, 1);
        assert!(stats.has_focus);
        assert_eq!(DayStats::for_day(&data, "2024-06-04"), DayStats::default());
    }
}
