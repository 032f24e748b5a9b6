//! 答题流程 - 流程层
//!
//! 把 `ExamTaking` 状态机和门户接口串起来：
//! 1. 取题 → 开始会话
//! 2. 作答 → 后台保存答案
//! 3. 确认交卷 → 等待答案保存完 → 结束会话 → 回到首页

use tracing::{error, info, warn};

use crate::clients::PortalClient;
use crate::config::Config;
use crate::error::{AppResult, ConfigError};
use crate::models::{ExamData, ExamSubmission, ExamType, Navigation};
use crate::services::AnswerSync;
use crate::workflow::exam_taking::{ExamPhase, ExamTaking};

const MISSING_DISPLAY_MESSAGE: &str = "未指定考试，请返回首页重新选择";

/// 答题流程
pub struct ExamRunner {
    client: PortalClient,
    display_id: Option<u64>,
    exam_type: Option<ExamType>,
    state: ExamTaking,
    sync: Option<AnswerSync>,
    submission: Option<ExamSubmission>,
}

impl ExamRunner {
    /// 创建答题流程
    ///
    /// # 参数
    /// - `client`: 门户客户端
    /// - `config`: 配置（考试ID、考试时长）
    /// - `exam_type`: 考试类型，决定试卷名称
    pub fn new(client: PortalClient, config: &Config, exam_type: Option<ExamType>) -> Self {
        let display_id = config.exam_display_id;
        let sync = display_id.map(|id| AnswerSync::new(client.clone(), id));
        Self {
            client,
            display_id,
            exam_type,
            state: ExamTaking::new(config.exam_duration_secs),
            sync,
            submission: None,
        }
    }

    /// 加载题目并开始考试会话
    ///
    /// 失败时状态机进入 Error，返回原始错误（认证错误由调用方跳转登录页）
    pub async fn bootstrap(&mut self) -> AppResult<()> {
        let Some(display_id) = self.display_id else {
            self.state.fail(MISSING_DISPLAY_MESSAGE);
            return Err(ConfigError::Missing {
                name: "EXAM_DISPLAY_ID".to_string(),
            }
            .into());
        };

        info!("📥 正在加载考试 {} 的题目...", display_id);
        let questions = match self.client.fetch_questions(display_id).await {
            Ok(questions) => questions,
            Err(e) => {
                error!("❌ 题目加载失败: {}", e);
                self.state.fail(format!("题目加载失败: {}", e));
                return Err(e);
            }
        };

        let exam = ExamData::new(display_id, self.exam_type, questions);
        let name = exam.name.clone();
        let total = exam.len();
        self.state.load(exam)?;
        crate::utils::logging::log_exam_loaded(&name, total);

        match self.client.start_session(display_id).await {
            Ok(session) => {
                info!("✓ 考试会话已创建: {}", session.id);
                self.state.attach_session(session.id)
            }
            Err(e) => {
                error!("❌ 考试会话创建失败: {}", e);
                self.state.fail(format!("考试会话创建失败: {}", e));
                Err(e)
            }
        }
    }

    /// 加载失败后重试
    pub async fn retry(&mut self) -> AppResult<()> {
        if !matches!(self.state.phase(), ExamPhase::Error(_)) {
            warn!("当前没有需要重试的错误");
            return Ok(());
        }
        self.state.reset_for_retry();
        self.bootstrap().await
    }

    /// 选择选项并后台保存
    pub fn select_option(&mut self, option: usize) -> AppResult<()> {
        let submission = self.state.select_option(option)?;
        self.persist(submission);
        Ok(())
    }

    /// 填写文本答案并后台保存
    pub fn write_answer(&mut self, text: impl Into<String>) -> AppResult<()> {
        let submission = self.state.write_answer(text)?;
        self.persist(submission);
        Ok(())
    }

    fn persist(&mut self, submission: crate::models::AnswerSubmission) {
        if let Some(sync) = self.sync.as_mut() {
            sync.persist(submission);
        }
    }

    /// 确认交卷
    ///
    /// 结束会话失败只记录日志，无论如何都回到首页
    pub async fn confirm_submit(&mut self) -> AppResult<Navigation> {
        let request = self.state.confirm_submit()?;
        let display_id = self.display_id.ok_or(ConfigError::Missing {
            name: "EXAM_DISPLAY_ID".to_string(),
        })?;

        if let Some(sync) = self.sync.as_mut() {
            sync.drain().await;
        }

        match self.client.end_session(display_id, &request).await {
            Ok(submission) => {
                match submission.total() {
                    Some(total) => info!("🎉 交卷成功，总分: {}", total),
                    None => info!("🎉 交卷成功"),
                }
                self.submission = Some(submission);
            }
            Err(e) => error!("❌ 结束考试会话失败: {}", e),
        }

        self.state.finish();
        Ok(Navigation::Dashboard)
    }

    pub fn state(&self) -> &ExamTaking {
        &self.state
    }

    /// 导航、标记、划选项等不涉及网络的操作直接作用于状态机
    pub fn state_mut(&mut self) -> &mut ExamTaking {
        &mut self.state
    }

    pub fn submission(&self) -> Option<&ExamSubmission> {
        self.submission.as_ref()
    }

    pub fn display_id(&self) -> Option<u64> {
        self.display_id
    }
}
