//! 用户身份接口：登录、注册、登出、当前用户

use crate::clients::portal_client::{decode, encode, ensure_success};
use crate::clients::PortalClient;
use crate::error::{AppResult, AuthError};
use crate::infrastructure::ApiRequest;
use crate::models::user::{LoginRequest, LoginResponse, LogoutRequest, UsersPayload};
use crate::models::{RegistrationForm, User};

const LOGIN_PATH: &str = "users/login/";
const REGISTER_PATH: &str = "users/register/";
const LOGOUT_PATH: &str = "users/logout/";
const USER_PATH: &str = "users/user/";

impl PortalClient {
    /// 登录，返回 token 与用户信息（不写存储）
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let response = self
            .send_anonymous(ApiRequest::post(LOGIN_PATH).json(encode(LOGIN_PATH, request)?))
            .await?;

        if response.is_unauthorized() {
            return Err(AuthError::InvalidCredentials.into());
        }
        ensure_success(LOGIN_PATH, &response)?;
        decode(LOGIN_PATH, response.body)
    }

    /// 注册新用户
    pub async fn register(&self, form: &RegistrationForm) -> AppResult<()> {
        let response = self
            .send_anonymous(ApiRequest::post(REGISTER_PATH).json(encode(REGISTER_PATH, form)?))
            .await?;
        ensure_success(REGISTER_PATH, &response)
    }

    /// 通知服务端作废 refresh token
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let request = LogoutRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.post_unit(LOGOUT_PATH, Some(&request)).await
    }

    /// 获取用户信息
    pub async fn fetch_users(&self) -> AppResult<Vec<User>> {
        let payload: UsersPayload = self.get_json(USER_PATH).await?;
        Ok(payload.0)
    }
}
