//! 试卷录入流程 - 流程层
//!
//! 流程顺序：
//! 1. 创建试卷 → 生成结构 → 拉取结构树
//! 2. 逐题录入，向导自动在模块 / 部分之间推进
//! 3. 全部录完或手动提交后跳转到试卷列表

use tracing::{error, info};

use crate::clients::PortalClient;
use crate::error::{AppResult, ValidationError, WorkflowError};
use crate::models::{AuthoredQuestion, ExamDraft, ExamType, ModulePath, ModuleUpdate, Navigation};
use crate::workflow::authoring::{Advance, AuthoringWizard};

/// 录入一道题后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAdded {
    pub advance: Advance,
    /// 全部录完时需要跳转的页面
    pub navigation: Option<Navigation>,
}

/// 试卷录入流程
pub struct ExamAuthoring {
    client: PortalClient,
    exam_id: Option<u64>,
    exam_type: Option<ExamType>,
    wizard: Option<AuthoringWizard>,
}

impl ExamAuthoring {
    pub fn new(client: PortalClient) -> Self {
        Self {
            client,
            exam_id: None,
            exam_type: None,
            wizard: None,
        }
    }

    /// 创建试卷并初始化录入向导
    ///
    /// # 参数
    /// - `draft`: 试卷表单
    ///
    /// # 返回
    /// 服务端分配的试卷ID
    pub async fn create_exam(&mut self, draft: &ExamDraft) -> AppResult<u64> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::Required { field: "name" }.into());
        }

        info!("📝 创建试卷: {} ({})", draft.name, draft.exam_type.name());
        let exam_id = self.client.create_exam(draft).await.map_err(|e| {
            error!("❌ 创建试卷失败: {}", e);
            e
        })?;

        self.client
            .create_structure(draft.exam_type, exam_id)
            .await
            .map_err(|e| {
                error!("❌ 生成试卷结构失败: {}", e);
                e
            })?;

        let exam = self.client.get_exam(draft.exam_type, exam_id).await?;
        info!(
            "✓ 试卷 {} 已创建，共 {} 个部分",
            exam_id,
            exam.sections.len()
        );

        self.wizard = Some(AuthoringWizard::new(exam)?);
        self.exam_id = Some(exam_id);
        self.exam_type = Some(draft.exam_type);
        Ok(exam_id)
    }

    /// 录入当前模块的一道题
    pub async fn add_question(&mut self, draft: AuthoredQuestion) -> AppResult<QuestionAdded> {
        let exam_type = self.exam_type.ok_or(WorkflowError::ExamNotCreated)?;
        let wizard = self.wizard.as_mut().ok_or(WorkflowError::ExamNotCreated)?;

        let prepared = wizard.prepare(draft)?;
        let created = self
            .client
            .create_question(exam_type, &prepared)
            .await
            .map_err(|e| {
                error!("❌ 题目录入失败: {}", e);
                e
            })?;

        let advance = wizard.record_question(created)?;
        let navigation = match advance {
            Advance::Finished => Some(Navigation::ExamList(exam_type)),
            _ => None,
        };
        Ok(QuestionAdded {
            advance,
            navigation,
        })
    }

    /// 把整棵结构树写回服务端
    pub async fn submit_exam(&self) -> AppResult<Navigation> {
        let exam_id = self.exam_id.ok_or(WorkflowError::ExamNotCreated)?;
        let wizard = self.wizard.as_ref().ok_or(WorkflowError::ExamNotCreated)?;

        self.client.update_exam(wizard.exam(), exam_id).await?;
        info!("✓ 试卷 {} 已提交", exam_id);
        Ok(Navigation::ExamList(wizard.exam().exam_type))
    }

    pub fn select_section(&mut self, name: &str) -> AppResult<bool> {
        Ok(self.wizard_mut()?.select_section(name))
    }

    pub fn update_module(&mut self, path: ModulePath, update: ModuleUpdate) -> AppResult<()> {
        self.wizard_mut()?.update_module(path, update)
    }

    pub fn wizard(&self) -> Option<&AuthoringWizard> {
        self.wizard.as_ref()
    }

    fn wizard_mut(&mut self) -> AppResult<&mut AuthoringWizard> {
        self.wizard
            .as_mut()
            .ok_or_else(|| WorkflowError::ExamNotCreated.into())
    }

    pub fn exam_id(&self) -> Option<u64> {
        self.exam_id
    }
}
