#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::StorageError;
use crate::models::AppData;

/// 持久化数据所在的固定键
pub const STORAGE_KEY: &str = "zenplan_data";

/// 本地键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 文件存储：每个键对应数据目录下的一个 `<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| io_error(&path, e))
    }
}

/// 内存存储（测试用）
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 加载数据；不存在时返回初始数据
pub fn load_data(store: &dyn KeyValueStore, seed_habits: bool) -> Result<AppData, StorageError> {
    let Some(content) = store.get(STORAGE_KEY)? else {
        info!("event=data_load status=empty seed_habits={}", seed_habits);
        return Ok(if seed_habits {
            AppData::seeded()
        } else {
            AppData::default()
        });
    };

    let data: AppData = serde_json::from_str(&content).map_err(|source| {
        warn!("event=data_load status=corrupt error={}", source);
        StorageError::Corrupt {
            key: STORAGE_KEY.to_string(),
            source,
        }
    })?;

    info!(
        "event=data_load status=ok tasks={} habits={} focus={}",
        data.tasks.len(),
        data.habits.len(),
        data.daily_focus.len()
    );
    Ok(data)
}

/// 整体序列化并写入
pub fn save_data(store: &mut dyn KeyValueStore, data: &AppData) -> Result<(), StorageError> {
    let content = serde_json::to_string(data)?;
    store.set(STORAGE_KEY, &content)
}
