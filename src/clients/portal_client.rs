/// 门户 API 客户端
///
/// 封装认证头、401 刷新重试和 JSON 解析；具体接口在同目录的其他文件中按领域拆分
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, AuthError};
use crate::infrastructure::{ApiRequest, ApiResponse, Transport};
use crate::models::user::{RefreshRequest, RefreshResponse};
use crate::services::SessionStore;

const REFRESH_PATH: &str = "token/refresh/";

/// 门户客户端，可廉价克隆后在后台任务中使用
#[derive(Clone)]
pub struct PortalClient {
    transport: Arc<dyn Transport>,
    store: Arc<SessionStore>,
}

impl PortalClient {
    /// 创建新的门户客户端
    pub fn new(transport: Arc<dyn Transport>, store: Arc<SessionStore>) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// 发送需要登录的请求
    ///
    /// 遇到 401 时只刷新一次 token 并重试一次原请求；
    /// 刷新失败或重试仍是 401 时返回认证错误（跳转登录页）
    pub async fn send_authorized(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let first = self
            .transport
            .execute(request.clone().bearer(self.store.access_token()))
            .await?;

        if !first.is_unauthorized() {
            return Ok(first);
        }

        info!("🔑 {} 返回 401，尝试刷新登录凭证", request.path);
        let access = self.refresh_access_token().await?;

        let retry = self
            .transport
            .execute(request.clone().bearer(Some(access)))
            .await?;

        if retry.is_unauthorized() {
            warn!("刷新后重试仍返回 401: {}", request.path);
            return Err(AuthError::LoginRequired {
                endpoint: request.path,
            }
            .into());
        }

        Ok(retry)
    }

    /// 发送不带认证头的请求（登录 / 注册）
    pub async fn send_anonymous(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.transport.execute(request).await
    }

    /// 使用 refresh token 换取新的 access token 并写回存储
    pub async fn refresh_access_token(&self) -> AppResult<String> {
        let refresh = self
            .store
            .refresh_token()
            .ok_or(AuthError::MissingTokens)?;

        let body = serde_json::to_value(RefreshRequest { refresh })
            .map_err(|e| AppError::json_parse_failed(REFRESH_PATH, e))?;
        let response = self
            .transport
            .execute(ApiRequest::post(REFRESH_PATH).json(body))
            .await?;

        if !response.is_success() {
            warn!("刷新登录凭证失败: status={}", response.status);
            return Err(AuthError::RefreshFailed {
                status: response.status,
            }
            .into());
        }

        let refreshed: RefreshResponse = decode(REFRESH_PATH, response.body)?;
        self.store.update_access_token(refreshed.access.clone())?;
        debug!("登录凭证已刷新");
        Ok(refreshed.access)
    }

    /// GET 并解析为指定类型
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send_authorized(ApiRequest::get(path)).await?;
        parse_response(path, response)
    }

    /// POST 并解析为指定类型
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(path, body)?;
        let response = self
            .send_authorized(ApiRequest::post(path).json(body))
            .await?;
        parse_response(path, response)
    }

    /// PUT 并解析为指定类型
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(path, body)?;
        let response = self
            .send_authorized(ApiRequest::put(path).json(body))
            .await?;
        parse_response(path, response)
    }

    /// POST，只关心是否成功
    pub async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::post(path);
        if let Some(body) = body {
            request = request.json(encode(path, body)?);
        }
        let response = self.send_authorized(request).await?;
        ensure_success(path, &response)
    }

    /// DELETE，只关心是否成功
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self.send_authorized(ApiRequest::delete(path)).await?;
        ensure_success(path, &response)
    }
}

pub(crate) fn encode<B: Serialize + ?Sized>(path: &str, body: &B) -> AppResult<JsonValue> {
    serde_json::to_value(body).map_err(|e| AppError::json_parse_failed(path, e))
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: JsonValue) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::json_parse_failed(path, e))
}

pub(crate) fn ensure_success(path: &str, response: &ApiResponse) -> AppResult<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(AppError::bad_response(
            path,
            response.status,
            response.error_message(),
        ))
    }
}

pub(crate) fn parse_response<T: DeserializeOwned>(path: &str, response: ApiResponse) -> AppResult<T> {
    ensure_success(path, &response)?;
    decode(path, response.body)
}
