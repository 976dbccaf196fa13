//! 配置文件 (~/.config/zenplan/config.toml)
//!
//! 文件不存在时使用默认值；命令行参数优先于文件。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const APP_DIR_NAME: &str = "zenplan";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据目录，默认 ~/.local/share/zenplan/
    pub data_dir: Option<PathBuf>,
    /// 导出目录，默认下载目录
    pub export_dir: Option<PathBuf>,
    pub log_level: String,
    /// 首次启动时是否预置默认习惯
    pub seed_default_habits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            log_level: "info".to_string(),
            seed_default_habits: true,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
    }

    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)))
    }

    /// 导出目录：配置 > 下载目录 > 数据目录
    pub fn resolve_export_dir(&self, data_dir: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| data_dir.to_path_buf())
    }
}
