//! 备份导出与导入
//!
//! 导出：整体数据写成 `zenplan-backup-<YYYY-MM-DD>.json`。
//! 导入：只做浅层检查（`tasks` 与 `habits` 为真值），通过后整体替换。

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;

use crate::calendar::day_key;
use crate::error::{ImportError, StorageError};
use crate::models::AppData;

pub fn backup_file_name(today: NaiveDate) -> String {
    format!("zenplan-backup-{}.json", day_key(today))
}

/// 导出到目录，返回文件路径
pub fn export_data(data: &AppData, dir: &Path, today: NaiveDate) -> Result<PathBuf, StorageError> {
    let content = serde_json::to_string_pretty(data)?;
    fs::create_dir_all(dir).map_err(|source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(backup_file_name(today));
    fs::write(&path, content).map_err(|source| StorageError::Io {
        path: path.clone(),
        source,
    })?;

    info!("event=export status=ok path={}", path.display());
    Ok(path)
}

/// JSON 真值判断（null/false/0/空串为假，数组与对象总为真）
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// 解析导入内容
pub fn parse_import(content: &str) -> Result<AppData, ImportError> {
    let value: Value = serde_json::from_str(content).map_err(ImportError::Malformed)?;

    if !is_truthy(value.get("tasks")) || !is_truthy(value.get("habits")) {
        return Err(ImportError::InvalidFormat(
            "missing `tasks` or `habits`".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ImportError::InvalidFormat(e.to_string()))
}

/// 读取并解析导入文件
pub fn import_file(path: &Path) -> Result<AppData, ImportError> {
    let result = fs::read_to_string(path)
        .map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|content| parse_import(&content));

    match &result {
        Ok(data) => info!(
            "event=import status=ok path={} tasks={} habits={}",
            path.display(),
            data.tasks.len(),
            data.habits.len()
        ),
        Err(e) => warn!("event=import status=rejected path={} error={}", path.display(), e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppData {
        let mut data = AppData::seeded();
        let id = data.add_task("Review notes", "2024-06-03".to_string());
        data.toggle_task(&id);
        data.add_task("Call mom", "2024-06-04".to_string());
        let habit = data.habits[0].id.clone();
        data.toggle_habit_completion(&habit, "2024-06-03");
        data.set_focus("2024-06-03", "One thing at a time");
        data
    }

    #[test]
    fn test_backup_file_name() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(backup_file_name(today), "zenplan-backup-2024-06-03.json");
    }

    #[test]
    fn test_export_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let data = sample();

        let path = export_data(&data, dir.path(), today).unwrap();
        assert_eq!(path.file_name().unwrap(), "zenplan-backup-2024-06-03.json");
        assert_eq!(import_file(&path).unwrap(), data);
    }

    #[test]
    fn test_missing_habits_is_invalid() {
        let err = parse_import(r#"{"tasks": [], "dailyFocus": {}}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat(_)));
        assert_eq!(err.user_message(), "Invalid data format.");
    }

    #[test]
    fn test_falsy_fields_are_invalid() {
        for content in [
            r#"{"tasks": null, "habits": []}"#,
            r#"{"tasks": [], "habits": 0}"#,
            r#"{"tasks": "", "habits": []}"#,
            r#"[1, 2, 3]"#,
        ] {
            assert!(matches!(
                parse_import(content),
                Err(ImportError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        let err = parse_import(r#"{"tasks": true, "habits": []}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_import("{\"tasks\": [").unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));
        assert_eq!(err.user_message(), "Error reading file.");
    }

    #[test]
    fn test_empty_collections_accepted() {
        let data = parse_import(r#"{"tasks": [], "habits": []}"#).unwrap();
        assert_eq!(data, AppData::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
