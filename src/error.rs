//! 错误类型
//!
//! 模型层的增删改不会失败；只有存储、导入与配置会产生错误。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stored data under `{key}` is not valid: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 导入错误
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("file does not contain planner data: {0}")]
    InvalidFormat(String),
}

impl ImportError {
    /// 弹窗中展示给用户的提示
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::Io { .. } | ImportError::Malformed(_) => "Error reading file.",
            ImportError::InvalidFormat(_) => "Invalid data format.",
        }
    }
}

/// 配置文件错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 日志初始化错误
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger setup failed: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

/// 程序顶层错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("no usable {0} directory on this system")]
    NoDirectory(&'static str),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
