use thiserror::Error;

use crate::models::Navigation;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 认证错误
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 表单 / 答题校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 流程状态错误
    #[error("流程错误: {0}")]
    Workflow(#[from] WorkflowError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 认证错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 本地没有可用的 token
    #[error("未找到登录凭证，请重新登录")]
    MissingTokens,
    /// 刷新 token 失败
    #[error("刷新登录凭证失败 (status={status})")]
    RefreshFailed { status: u16 },
    /// 刷新后重试仍然返回 401
    #[error("登录已失效，请重新登录 ({endpoint})")]
    LoginRequired { endpoint: String },
    /// 用户名或密码错误
    #[error("登录失败，请检查账号和密码")]
    InvalidCredentials,
}

/// 校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 当前题目未作答也未标记
    #[error("请先作答或标记第 {number} 题，再继续")]
    NotAnswered { number: usize },
    /// 只有最后一题才能交卷
    #[error("只有在最后一题才能交卷")]
    NotOnLastQuestion,
    /// 在非选择题上选择选项
    #[error("第 {number} 题不是选择题")]
    NotAChoiceQuestion { number: usize },
    /// 在选择题上填写文本
    #[error("第 {number} 题是选择题，请选择选项")]
    ChoiceRequired { number: usize },
    /// 选项索引越界
    #[error("选项 {option} 超出范围 [0, {count})")]
    OptionOutOfRange { option: usize, count: usize },
    /// 必填字段为空
    #[error("{field} 不能为空")]
    Required { field: &'static str },
    /// 邮箱格式不正确
    #[error("邮箱格式不正确: {email}")]
    InvalidEmail { email: String },
    /// 密码太短
    #[error("密码长度至少为 {min} 位")]
    PasswordTooShort { min: usize },
    /// 两次输入的密码不一致
    #[error("两次输入的密码不一致")]
    PasswordMismatch,
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必需的配置项
    #[error("缺少配置项: {name}")]
    Missing { name: String },
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// 流程状态错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// 在错误的阶段调用操作
    #[error("当前阶段 {phase} 不允许执行 {action}")]
    InvalidPhase {
        phase: &'static str,
        action: &'static str,
    },
    /// 尚未获得考试会话
    #[error("考试会话尚未创建")]
    NoSession,
    /// 试卷没有题目
    #[error("试卷中没有题目")]
    EmptyExam,
    /// 试卷结构为空
    #[error("试卷结构中没有任何模块")]
    EmptyStructure,
    /// 当前没有可录入的模块
    #[error("当前没有可录入题目的模块")]
    NoCurrentModule,
    /// 模块尚未在服务端创建
    #[error("模块 {name} 缺少服务端ID")]
    ModuleNotPersisted { name: String },
    /// 试卷尚未创建
    #[error("试卷尚未创建")]
    ExamNotCreated,
    /// 录入已全部完成
    #[error("所有部分的题目均已录入完成")]
    AuthoringFinished,
    /// 索引路径不存在
    #[error("模块路径不存在: 部分 {section}, 模块 {module}")]
    PathNotFound { section: usize, module: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建API错误响应
    pub fn bad_response(endpoint: impl Into<String>, status: u16, message: Option<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message,
        })
    }

    /// 创建JSON解析错误
    pub fn json_parse_failed(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 认证类错误需要跳转到登录页
    pub fn redirect(&self) -> Option<Navigation> {
        match self {
            AppError::Auth(_) => Some(Navigation::Login),
            _ => None,
        }
    }

    /// 是否为认证错误
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }

    /// 返回校验错误（如果是）
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_redirect_to_login() {
        let err: AppError = AuthError::MissingTokens.into();
        assert_eq!(err.redirect(), Some(Navigation::Login));
        assert!(err.is_auth());

        let err = AppError::bad_response("/users/user/", 500, None);
        assert_eq!(err.redirect(), None);
    }

    #[test]
    fn test_validation_message() {
        let err: AppError = ValidationError::NotAnswered { number: 3 }.into();
        assert_eq!(err.to_string(), "校验错误: 请先作答或标记第 3 题，再继续");
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::NotAnswered { number: 3 })
        );
    }
}
