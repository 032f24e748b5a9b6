//! 认证服务 - 业务能力层
//!
//! 表单校验 + 登录 / 注册 / 登出，并负责把 token 写进 SessionStore

use std::sync::OnceLock;

use regex::Regex;
use tracing::{error, info};

use crate::clients::PortalClient;
use crate::error::{AppResult, AuthError, ValidationError};
use crate::models::user::LoginRequest;
use crate::models::{Navigation, RegistrationForm, User};
use crate::services::session_store::TokenScope;

const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// 校验邮箱
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }
    if !email_pattern().is_match(email) {
        return Err(ValidationError::InvalidEmail {
            email: email.to_string(),
        });
    }
    Ok(())
}

/// 校验登录表单
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    Ok(())
}

/// 校验注册表单
pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationError> {
    validate_email(&form.email)?;
    if form.password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if form.test_type.is_empty() {
        return Err(ValidationError::Required { field: "test_type" });
    }
    Ok(())
}

/// 认证服务
pub struct AuthService {
    client: PortalClient,
}

impl AuthService {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    /// 登录；`remember` 为 true 时 token 持久化保存
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> AppResult<Navigation> {
        validate_login(email, password)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.login(&request).await.map_err(|e| {
            error!("登录失败: {}", e);
            e
        })?;

        let scope = if remember {
            TokenScope::Persistent
        } else {
            TokenScope::Session
        };
        self.client.store().store_tokens(response.tokens(), scope)?;

        if let Some(user) = &response.user {
            info!("✓ 登录成功: {}", user.email);
        } else {
            info!("✓ 登录成功");
        }
        Ok(Navigation::Dashboard)
    }

    /// 管理员登录，token 持久化保存
    pub async fn admin_login(&self, email: &str, password: &str) -> AppResult<Navigation> {
        validate_login(email, password)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let tokens = self.client.admin_login(&request).await.map_err(|e| {
            error!("管理员登录失败: {}", e);
            e
        })?;
        self.client
            .store()
            .store_tokens(tokens, TokenScope::Persistent)?;

        info!("✓ 管理员登录成功: {}", email);
        Ok(Navigation::Dashboard)
    }

    /// 注册新用户，成功后进入首页
    pub async fn register(&self, form: &RegistrationForm) -> AppResult<Navigation> {
        validate_registration(form)?;
        self.client.register(form).await?;
        info!("✓ 注册成功: {}", form.email);
        Ok(Navigation::Dashboard)
    }

    /// 登出并清除本地所有 token
    pub async fn logout(&self) -> AppResult<Navigation> {
        let store = self.client.store();
        let (Some(_), Some(refresh)) = (store.access_token(), store.refresh_token()) else {
            return Err(AuthError::MissingTokens.into());
        };

        self.client.logout(&refresh).await.map_err(|e| {
            error!("登出失败: {}", e);
            e
        })?;
        store.clear_tokens()?;
        info!("👋 已登出");
        Ok(Navigation::Login)
    }

    /// 当前登录用户
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        if self.client.store().access_token().is_none() {
            return Ok(None);
        }
        Ok(self.client.fetch_users().await?.into_iter().next())
    }
}
