//! 试卷录入向导 - 流程层
//!
//! 在服务端生成的"部分 → 模块"结构树上移动的游标，只负责状态推进，不发请求

use tracing::info;

use crate::error::{AppResult, WorkflowError};
use crate::models::{AuthoredQuestion, Exam, Module, ModulePath, ModuleUpdate};

/// 录入游标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthoringCursor {
    pub section: usize,
    pub module: usize,
    pub question: usize,
    pub set: usize,
}

/// 录入一道题后的推进结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// 当前模块还没录满
    NextQuestion,
    /// 模块录满，进入同一部分的下一个模块
    ModuleCompleted { module: String },
    /// 模块录满且该部分结束，进入下一部分
    SectionCompleted { section: String, module: String },
    /// 全部录完
    Finished,
}

/// 录入向导
#[derive(Debug, Clone)]
pub struct AuthoringWizard {
    exam: Exam,
    cursor: AuthoringCursor,
    finished: bool,
    module_notice: Option<String>,
    section_notice: Option<String>,
}

impl AuthoringWizard {
    /// 用服务端返回的结构树初始化
    pub fn new(exam: Exam) -> AppResult<Self> {
        let Some(first) = exam.sections.iter().position(|s| !s.modules.is_empty()) else {
            return Err(WorkflowError::EmptyStructure.into());
        };
        Ok(Self {
            exam,
            cursor: AuthoringCursor {
                section: first,
                ..AuthoringCursor::default()
            },
            finished: false,
            module_notice: None,
            section_notice: None,
        })
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn into_exam(self) -> Exam {
        self.exam
    }

    pub fn cursor(&self) -> AuthoringCursor {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_path(&self) -> ModulePath {
        ModulePath::new(self.cursor.section, self.cursor.module)
    }

    pub fn current_module(&self) -> Option<&Module> {
        if self.finished {
            return None;
        }
        self.exam.module(self.current_path())
    }

    /// 新题目所属题组（从 1 开始）
    pub fn draft_set(&self) -> u32 {
        self.cursor.set as u32 + 1
    }

    /// 准备提交的题目：补上模块ID、题组，答案转大写
    pub fn prepare(&self, mut draft: AuthoredQuestion) -> AppResult<AuthoredQuestion> {
        if self.finished {
            return Err(WorkflowError::AuthoringFinished.into());
        }
        let module = self.current_module().ok_or(WorkflowError::NoCurrentModule)?;
        let module_id = module.id.ok_or_else(|| WorkflowError::ModuleNotPersisted {
            name: module.name.clone(),
        })?;

        draft.module = Some(module_id);
        draft.correct_answer = draft.correct_answer.to_uppercase();
        draft.set = Some(self.draft_set());
        Ok(draft)
    }

    /// 记录服务端已创建的题目并推进游标
    pub fn record_question(&mut self, created: AuthoredQuestion) -> AppResult<Advance> {
        if self.finished {
            return Err(WorkflowError::AuthoringFinished.into());
        }
        let path = self.current_path();
        let set = self.draft_set();
        let module = self
            .exam
            .module_mut(path)
            .ok_or(WorkflowError::NoCurrentModule)?;
        module.questions.push(created);

        if (module.questions_in_set(set) as u32) < module.question_count {
            self.cursor.question += 1;
            return Ok(Advance::NextQuestion);
        }

        let completed_module = module.name.clone();
        self.module_notice = Some(completed_module.clone());
        info!("✓ 模块 {} 录入完成", completed_module);
        Ok(self.advance_module(completed_module))
    }

    fn advance_module(&mut self, completed_module: String) -> Advance {
        let section = &self.exam.sections[self.cursor.section];
        if self.cursor.module + 1 < section.modules.len() {
            self.cursor.module += 1;
            self.cursor.question = 0;
            self.cursor.set = 0;
            return Advance::ModuleCompleted {
                module: completed_module,
            };
        }

        let completed_section = section.name.clone();
        self.section_notice = Some(completed_section.clone());
        info!("✓ 部分 {} 录入完成", completed_section);

        let next_section = self.exam.sections[self.cursor.section + 1..]
            .iter()
            .position(|s| !s.modules.is_empty())
            .map(|offset| self.cursor.section + 1 + offset);

        if let Some(section) = next_section {
            self.cursor = AuthoringCursor {
                section,
                ..AuthoringCursor::default()
            };
            Advance::SectionCompleted {
                section: completed_section,
                module: completed_module,
            }
        } else {
            self.finished = true;
            info!("🎉 试卷 {} 全部录入完成", self.exam.name);
            Advance::Finished
        }
    }

    /// 按名称跳转到某个部分；没有模块的部分不能跳转
    pub fn select_section(&mut self, name: &str) -> bool {
        let Some(index) = self
            .exam
            .sections
            .iter()
            .position(|s| s.name == name && !s.modules.is_empty())
        else {
            return false;
        };
        self.cursor = AuthoringCursor {
            section: index,
            ..AuthoringCursor::default()
        };
        self.finished = false;
        true
    }

    /// 按路径修改模块的单个字段
    pub fn update_module(&mut self, path: ModulePath, update: ModuleUpdate) -> AppResult<()> {
        let module = self
            .exam
            .module_mut(path)
            .ok_or(WorkflowError::PathNotFound {
                section: path.section,
                module: path.module,
            })?;
        module.apply(update);
        Ok(())
    }

    /// 当前模块当前题组的录入进度（百分比）
    pub fn module_progress(&self) -> u32 {
        let Some(module) = self.current_module() else {
            return 100;
        };
        if module.question_count == 0 {
            return 0;
        }
        let done = module.questions_in_set(self.draft_set()) as u32;
        (done.min(module.question_count) * 100) / module.question_count
    }

    pub fn module_notice(&self) -> Option<&str> {
        self.module_notice.as_deref()
    }

    pub fn section_notice(&self) -> Option<&str> {
        self.section_notice.as_deref()
    }

    pub fn dismiss_notices(&mut self) {
        self.module_notice = None;
        self.section_notice = None;
    }
}
