//! 考试展示接口：取题、开始会话、提交答案、结束会话

use tracing::debug;

use crate::clients::PortalClient;
use crate::error::AppResult;
use crate::models::{AnswerSubmission, EndSessionRequest, ExamSession, ExamSubmission, Question};

fn display_path(display_id: u64, action: &str) -> String {
    format!("exam-displays/{}/{}/", display_id, action)
}

impl PortalClient {
    /// 获取考试展示下的全部题目
    pub async fn fetch_questions(&self, display_id: u64) -> AppResult<Vec<Question>> {
        let questions: Vec<Question> = self
            .get_json(&display_path(display_id, "questions"))
            .await?;
        debug!("考试 {} 共 {} 道题", display_id, questions.len());
        Ok(questions)
    }

    /// 开始一次考试会话
    pub async fn start_session(&self, display_id: u64) -> AppResult<ExamSession> {
        self.post_json(
            &display_path(display_id, "start_session"),
            &serde_json::json!({}),
        )
        .await
    }

    /// 提交单题答案
    pub async fn submit_answer(
        &self,
        display_id: u64,
        submission: &AnswerSubmission,
    ) -> AppResult<()> {
        self.post_unit(&display_path(display_id, "submit_answer"), Some(submission))
            .await
    }

    /// 结束考试会话，返回成绩记录
    pub async fn end_session(
        &self,
        display_id: u64,
        request: &EndSessionRequest,
    ) -> AppResult<ExamSubmission> {
        self.post_json(&display_path(display_id, "end_session"), request)
            .await
    }
}
