use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, StorageError};
use crate::models::ExamType;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// token / 主题存储文件
    pub storage_path: PathBuf,
    /// 考试倒计时时长（秒）
    pub exam_duration_secs: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 要参加的考试展示ID
    pub exam_display_id: Option<u64>,
    /// 考试类型，决定显示的试卷名称
    pub exam_type: Option<ExamType>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            request_timeout_secs: 30,
            storage_path: PathBuf::from(".exam_portal/storage.toml"),
            exam_duration_secs: 3600,
            verbose_logging: false,
            exam_display_id: None,
            exam_type: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("PORTAL_API_BASE_URL").unwrap_or(default.api_base_url),
            request_timeout_secs: std::env::var("PORTAL_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            storage_path: std::env::var("PORTAL_STORAGE_PATH").map(PathBuf::from).unwrap_or(default.storage_path),
            exam_duration_secs: std::env::var("EXAM_DURATION_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.exam_duration_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            exam_display_id: std::env::var("EXAM_DISPLAY_ID").ok().and_then(|v| v.parse().ok()),
            exam_type: std::env::var("EXAM_TYPE").ok().and_then(|v| ExamType::parse(&v)),
        }
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StorageError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| {
            StorageError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
