//! 学生首页、成绩报告与管理员登录接口

use crate::clients::portal_client::{decode, encode, ensure_success};
use crate::clients::PortalClient;
use crate::error::{AppResult, AuthError};
use crate::infrastructure::ApiRequest;
use crate::models::user::LoginRequest;
use crate::models::{PerformanceEntry, StudentDashboard, StudentReport, TokenPair};

const DASHBOARD_PATH: &str = "student/dashboard/";
const REPORTS_PATH: &str = "student/reports/";
const PERFORMANCE_PATH: &str = "users/student/performance/";
const ADMIN_LOGIN_PATH: &str = "users/admin/login/";

impl PortalClient {
    /// 学生首页：最近考试、待考试卷、分项成绩
    pub async fn student_dashboard(&self) -> AppResult<StudentDashboard> {
        self.get_json(DASHBOARD_PATH).await
    }

    /// 成绩报告
    pub async fn student_reports(&self) -> AppResult<StudentReport> {
        self.get_json(REPORTS_PATH).await
    }

    /// 分项成绩列表
    pub async fn student_performance(&self) -> AppResult<Vec<PerformanceEntry>> {
        self.get_json(PERFORMANCE_PATH).await
    }

    /// 管理员登录，只有 staff 账号能拿到 token（不写存储）
    pub async fn admin_login(&self, request: &LoginRequest) -> AppResult<TokenPair> {
        let response = self
            .send_anonymous(
                ApiRequest::post(ADMIN_LOGIN_PATH).json(encode(ADMIN_LOGIN_PATH, request)?),
            )
            .await?;

        if response.is_unauthorized() {
            return Err(AuthError::InvalidCredentials.into());
        }
        ensure_success(ADMIN_LOGIN_PATH, &response)?;
        decode(ADMIN_LOGIN_PATH, response.body)
    }
}
