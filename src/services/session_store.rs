//! 会话存储服务 - 业务能力层
//!
//! 集中管理 token 与主题，只通过显式的 load / save 读写磁盘。
//!
//! - `TokenScope::Persistent`：记住登录，token 会写入存储文件
//! - `TokenScope::Session`：只保存在内存中，进程退出即失效
//! - 主题总是写入存储文件

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppResult, StorageError};
use crate::models::TokenPair;

/// 界面主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// token 的保存范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    Persistent,
    Session,
}

/// 存储文件格式
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageFile {
    #[serde(default)]
    theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tokens: Option<TokenPair>,
}

#[derive(Debug, Default)]
struct StoreState {
    persistent: Option<TokenPair>,
    session: Option<TokenPair>,
    theme: Theme,
}

impl StoreState {
    // 与浏览器行为一致：优先读取持久化的 token
    fn active(&self) -> Option<&TokenPair> {
        self.persistent.as_ref().or(self.session.as_ref())
    }
}

/// 会话存储
pub struct SessionStore {
    path: Option<PathBuf>,
    state: RwLock<StoreState>,
}

impl SessionStore {
    /// 只在内存中保存（不落盘）
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// 从存储文件加载；文件不存在时返回空存储
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let file = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|source| StorageError::ReadFailed {
                    path: path.display().to_string(),
                    source,
                })?;
            toml::from_str::<StorageFile>(&content).map_err(|source| {
                StorageError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                }
            })?
        } else {
            debug!("存储文件不存在，使用空存储: {}", path.display());
            StorageFile::default()
        };

        info!(
            "✓ 已加载本地存储 (主题: {:?}, 已登录: {})",
            file.theme,
            file.tokens.is_some()
        );

        Ok(Self {
            path: Some(path),
            state: RwLock::new(StoreState {
                persistent: file.tokens,
                session: None,
                theme: file.theme,
            }),
        })
    }

    /// 写回存储文件，会话范围的 token 不会写入
    pub fn save(&self) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file = {
            let state = self.read();
            StorageFile {
                theme: state.theme,
                tokens: state.persistent.clone(),
            }
        };

        let content = toml::to_string(&file).map_err(StorageError::from)?;
        write_file(path, &content)?;
        debug!("已保存本地存储: {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().active().map(|t| t.access.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().active().map(|t| t.refresh.clone())
    }

    /// 当前 token 所在的范围
    pub fn scope(&self) -> Option<TokenScope> {
        let state = self.read();
        if state.persistent.is_some() {
            Some(TokenScope::Persistent)
        } else if state.session.is_some() {
            Some(TokenScope::Session)
        } else {
            None
        }
    }

    /// 登录成功后保存 token，同时清掉另一个范围里旧账号的 token
    pub fn store_tokens(&self, tokens: TokenPair, scope: TokenScope) -> AppResult<()> {
        let persistent_changed = {
            let mut state = self.write();
            match scope {
                TokenScope::Persistent => {
                    state.session = None;
                    state.persistent = Some(tokens);
                    true
                }
                TokenScope::Session => {
                    state.session = Some(tokens);
                    state.persistent.take().is_some()
                }
            }
        };
        if persistent_changed {
            self.save()?;
        }
        Ok(())
    }

    /// 刷新后更新 access token，保持原来的范围
    pub fn update_access_token(&self, access: impl Into<String>) -> AppResult<()> {
        let access = access.into();
        let scope = {
            let mut state = self.write();
            if let Some(tokens) = state.persistent.as_mut() {
                tokens.access = access;
                TokenScope::Persistent
            } else if let Some(tokens) = state.session.as_mut() {
                tokens.access = access;
                TokenScope::Session
            } else {
                warn!("没有可更新的 token，忽略新的 access token");
                return Ok(());
            }
        };
        self.save_if_persistent(scope)
    }

    /// 清除两个范围内的所有 token
    pub fn clear_tokens(&self) -> AppResult<()> {
        {
            let mut state = self.write();
            state.persistent = None;
            state.session = None;
        }
        self.save()
    }

    pub fn theme(&self) -> Theme {
        self.read().theme
    }

    pub fn set_theme(&self, theme: Theme) -> AppResult<()> {
        self.write().theme = theme;
        self.save()
    }

    pub fn toggle_theme(&self) -> AppResult<Theme> {
        let theme = {
            let mut state = self.write();
            state.theme = state.theme.toggled();
            state.theme
        };
        self.save()?;
        Ok(theme)
    }

    fn save_if_persistent(&self, scope: TokenScope) -> AppResult<()> {
        match scope {
            TokenScope::Persistent => self.save(),
            TokenScope::Session => Ok(()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::WriteFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    std::fs::write(path, content).map_err(|source| StorageError::WriteFailed {
        path: path.display().to_string(),
        source,
    })
}
