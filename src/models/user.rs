use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 门户用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub test_type: String,
    #[serde(default)]
    pub registration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_staff: bool,
}

/// access / refresh token 对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access: self.access.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// 注册表单
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub test_type: String,
}

/// `/users/user/` 可能返回单个对象也可能返回列表
pub(crate) fn deserialize_users<'de, D>(deserializer: D) -> Result<Vec<User>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(User),
        Many(Vec<User>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(user) => vec![user],
        OneOrMany::Many(users) => users,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersPayload(#[serde(deserialize_with = "deserialize_users")] pub Vec<User>);
