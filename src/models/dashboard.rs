use serde::{Deserialize, Serialize};

use crate::models::exam::ExamType;
use crate::models::user::User;

/// 学生的一次考试记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub time_taken: Option<String>,
}

/// 分项成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub section: String,
    pub score: f64,
}

/// `student/dashboard/` 返回的首页数据
///
/// 服务端有两种字段风格（`recent_tests` 与 `recentTests`），两者都接受。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StudentDashboard {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, alias = "recentTests")]
    pub recent_tests: Vec<ExamRecord>,
    #[serde(default, alias = "upcomingTests")]
    pub upcoming_tests: Vec<ExamRecord>,
    #[serde(default, alias = "performanceData")]
    pub performance_data: Vec<PerformanceEntry>,
}

impl StudentDashboard {
    /// 用户所考的类型，用于拼接 `{type}-exams/`
    pub fn exam_type(&self) -> Option<ExamType> {
        self.user.as_ref().and_then(|u| ExamType::parse(&u.test_type))
    }
}

/// 历次考试得分
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExamScore {
    pub id: u64,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub date: String,
}

/// 某一分项的成绩走势
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionProgress {
    pub section: String,
    #[serde(default)]
    pub scores: Vec<f64>,
}

/// `student/reports/` 返回的成绩报告
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    #[serde(default)]
    pub exam_scores: Vec<ExamScore>,
    #[serde(default)]
    pub section_progress: Vec<SectionProgress>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommended_study_areas: Vec<String>,
}
