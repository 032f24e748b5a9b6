//! 答题状态机 - 流程层
//!
//! 纯状态，不发请求：每个会影响服务端的操作都返回需要发送的请求体，由驱动方负责发送。
//!
//! 阶段：`Loading → Ready → Confirming → Submitted`，加载失败进入 `Error`，可重试。
//! `answers` / `marked` / `crossed` 的长度始终等于题目数量。

use crate::error::{AppResult, ValidationError, WorkflowError};
use crate::models::{AnswerSubmission, EndSessionRequest, ExamData, Question};
use crate::workflow::countdown::Countdown;

/// 答题阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamPhase {
    Loading,
    Ready,
    Confirming,
    Submitted,
    Error(String),
}

impl ExamPhase {
    fn name(&self) -> &'static str {
        match self {
            ExamPhase::Loading => "Loading",
            ExamPhase::Ready => "Ready",
            ExamPhase::Confirming => "Confirming",
            ExamPhase::Submitted => "Submitted",
            ExamPhase::Error(_) => "Error",
        }
    }
}

/// 作答进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamProgress {
    pub total: usize,
    pub answered: usize,
    pub marked: usize,
    pub unanswered: usize,
}

/// 答题状态机
#[derive(Debug, Clone)]
pub struct ExamTaking {
    phase: ExamPhase,
    exam: Option<ExamData>,
    session_id: Option<u64>,
    current: usize,
    answers: Vec<String>,
    marked: Vec<bool>,
    crossed: Vec<Vec<bool>>,
    countdown: Countdown,
    show_error: bool,
    annotation: String,
    annotation_visible: bool,
}

impl ExamTaking {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            phase: ExamPhase::Loading,
            exam: None,
            session_id: None,
            current: 0,
            answers: Vec::new(),
            marked: Vec::new(),
            crossed: Vec::new(),
            countdown: Countdown::new(duration_secs),
            show_error: false,
            annotation: String::new(),
            annotation_visible: false,
        }
    }

    // ========== 生命周期 ==========

    /// 题目加载完成，初始化作答状态
    pub fn load(&mut self, exam: ExamData) -> AppResult<()> {
        if exam.is_empty() {
            self.fail(WorkflowError::EmptyExam.to_string());
            return Err(WorkflowError::EmptyExam.into());
        }

        let n = exam.len();
        self.answers = vec![String::new(); n];
        self.marked = vec![false; n];
        self.crossed = exam
            .questions
            .iter()
            .map(|q| vec![false; q.option_count()])
            .collect();
        self.exam = Some(exam);
        self.current = 0;
        self.session_id = None;
        self.show_error = false;
        self.annotation_visible = false;
        self.phase = ExamPhase::Loading;
        Ok(())
    }

    /// 会话创建成功，可以开始作答
    pub fn attach_session(&mut self, session_id: u64) -> AppResult<()> {
        if self.exam.is_none() {
            return Err(self.invalid_phase("attach_session"));
        }
        self.session_id = Some(session_id);
        self.phase = ExamPhase::Ready;
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = ExamPhase::Error(message.into());
    }

    /// 重试加载前回到 Loading
    pub fn reset_for_retry(&mut self) {
        self.phase = ExamPhase::Loading;
        self.session_id = None;
        self.show_error = false;
    }

    // ========== 作答 ==========

    /// 选择题：选择第 `option` 个选项
    pub fn select_option(&mut self, option: usize) -> AppResult<AnswerSubmission> {
        self.ensure_phase(&[ExamPhase::Ready], "select_option")?;
        let question = self.current_question_or_err()?;
        if !question.question_type.is_choice() {
            return Err(ValidationError::NotAChoiceQuestion {
                number: self.current + 1,
            }
            .into());
        }
        let value = question
            .options
            .get(option)
            .cloned()
            .ok_or(ValidationError::OptionOutOfRange {
                option,
                count: question.option_count(),
            })?;
        self.record_answer(value)
    }

    /// 非选择题：填写文本答案
    pub fn write_answer(&mut self, text: impl Into<String>) -> AppResult<AnswerSubmission> {
        self.ensure_phase(&[ExamPhase::Ready], "write_answer")?;
        if self.current_question_or_err()?.question_type.is_choice() {
            return Err(ValidationError::ChoiceRequired {
                number: self.current + 1,
            }
            .into());
        }
        self.record_answer(text.into())
    }

    fn record_answer(&mut self, value: String) -> AppResult<AnswerSubmission> {
        let session = self.session_id.ok_or(WorkflowError::NoSession)?;
        let question_id = self.current_question_or_err()?.id;
        self.answers[self.current] = value.clone();
        self.show_error = false;
        Ok(AnswerSubmission {
            question_id,
            answer: value,
            exam_session: session,
        })
    }

    // ========== 导航 ==========

    /// 下一题：必须已作答或已标记
    pub fn next(&mut self) -> AppResult<()> {
        self.ensure_phase(&[ExamPhase::Ready], "next")?;
        self.check_answered_or_marked()?;
        if self.current + 1 < self.len() {
            self.current += 1;
            self.show_error = false;
            self.annotation_visible = false;
        }
        Ok(())
    }

    /// 上一题：第一题时不移动，返回是否移动
    pub fn previous(&mut self) -> bool {
        if self.phase != ExamPhase::Ready || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.show_error = false;
        self.annotation_visible = false;
        true
    }

    pub fn toggle_mark(&mut self) -> AppResult<bool> {
        self.ensure_phase(&[ExamPhase::Ready], "toggle_mark")?;
        let flag = &mut self.marked[self.current];
        *flag = !*flag;
        Ok(*flag)
    }

    /// 划掉 / 恢复选项，只影响显示
    pub fn toggle_cross(&mut self, option: usize) -> AppResult<bool> {
        self.ensure_phase(&[ExamPhase::Ready], "toggle_cross")?;
        let row = &mut self.crossed[self.current];
        let count = row.len();
        let flag = row
            .get_mut(option)
            .ok_or(ValidationError::OptionOutOfRange { option, count })?;
        *flag = !*flag;
        Ok(*flag)
    }

    pub fn toggle_annotation(&mut self) -> bool {
        self.annotation_visible = !self.annotation_visible;
        self.annotation_visible
    }

    pub fn set_annotation(&mut self, text: impl Into<String>) {
        self.annotation = text.into();
    }

    /// 倒计时走一秒
    pub fn tick(&mut self) -> u32 {
        self.countdown.tick()
    }

    // ========== 交卷 ==========

    /// 最后一题点击交卷：通过校验后进入确认
    pub fn request_submit(&mut self) -> AppResult<()> {
        self.ensure_phase(&[ExamPhase::Ready], "request_submit")?;
        if !self.is_last_question() {
            return Err(ValidationError::NotOnLastQuestion.into());
        }
        self.check_answered_or_marked()?;
        self.phase = ExamPhase::Confirming;
        Ok(())
    }

    pub fn cancel_submit(&mut self) -> AppResult<()> {
        self.ensure_phase(&[ExamPhase::Confirming], "cancel_submit")?;
        self.phase = ExamPhase::Ready;
        Ok(())
    }

    /// 确认交卷，返回结束会话请求
    pub fn confirm_submit(&self) -> AppResult<EndSessionRequest> {
        self.ensure_phase(&[ExamPhase::Confirming], "confirm_submit")?;
        let exam_session = self.session_id.ok_or(WorkflowError::NoSession)?;
        Ok(EndSessionRequest { exam_session })
    }

    pub fn finish(&mut self) {
        self.phase = ExamPhase::Submitted;
    }

    fn check_answered_or_marked(&mut self) -> AppResult<()> {
        if self.is_answered_or_marked(self.current) {
            self.show_error = false;
            Ok(())
        } else {
            self.show_error = true;
            Err(ValidationError::NotAnswered {
                number: self.current + 1,
            }
            .into())
        }
    }

    // ========== 查询 ==========

    pub fn phase(&self) -> &ExamPhase {
        &self.phase
    }

    pub fn exam(&self) -> Option<&ExamData> {
        self.exam.as_ref()
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session_id
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.exam.as_ref()?.questions.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.exam.as_ref().map_or(0, ExamData::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_last_question(&self) -> bool {
        self.len() > 0 && self.current + 1 == self.len()
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn marked(&self) -> &[bool] {
        &self.marked
    }

    pub fn crossed(&self) -> &[Vec<bool>] {
        &self.crossed
    }

    pub fn is_answered_or_marked(&self, index: usize) -> bool {
        self.answers.get(index).is_some_and(|a| !a.is_empty())
            || self.marked.get(index).copied().unwrap_or(false)
    }

    pub fn show_error(&self) -> bool {
        self.show_error
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn annotation_visible(&self) -> bool {
        self.annotation_visible
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn progress(&self) -> ExamProgress {
        let answered = self.answers.iter().filter(|a| !a.is_empty()).count();
        let marked = self.marked.iter().filter(|m| **m).count();
        ExamProgress {
            total: self.len(),
            answered,
            marked,
            unanswered: self.len() - answered,
        }
    }

    fn current_question_or_err(&self) -> AppResult<&Question> {
        self.current_question()
            .ok_or_else(|| WorkflowError::EmptyExam.into())
    }

    fn ensure_phase(&self, allowed: &[ExamPhase], action: &'static str) -> AppResult<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(self.invalid_phase(action))
        }
    }

    fn invalid_phase(&self, action: &'static str) -> crate::error::AppError {
        WorkflowError::InvalidPhase {
            phase: self.phase.name(),
            action,
        }
        .into()
    }
}
