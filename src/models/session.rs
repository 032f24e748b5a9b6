use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 服务端创建的考试会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSession {
    pub id: u64,
    #[serde(default)]
    pub exam_display: Option<u64>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// 单题作答提交
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: u64,
    pub answer: String,
    pub exam_session: u64,
}

/// 结束会话请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSessionRequest {
    pub exam_session: u64,
}

/// 交卷后服务端生成的成绩记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSubmission {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub exam: Option<u64>,
    #[serde(default)]
    pub user: Option<u64>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// verbal_score / math_score / total_score 等分数字段
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

impl ExamSubmission {
    pub fn total(&self) -> Option<f64> {
        self.scores
            .get("total_score")
            .or_else(|| self.scores.get("overall_score"))
            .copied()
    }
}
