//! 试卷管理接口：试卷 CRUD、生成结构、录入题目

use crate::clients::PortalClient;
use crate::error::AppResult;
use crate::models::authoring::CreatedExam;
use crate::models::{AuthoredQuestion, Exam, ExamDraft, ExamType};

fn exam_path(exam_type: ExamType, exam_id: u64) -> String {
    format!("{}{}/", exam_type.exams_path(), exam_id)
}

impl PortalClient {
    /// 列出某类考试的全部试卷
    pub async fn list_exams(&self, exam_type: ExamType) -> AppResult<Vec<Exam>> {
        self.get_json(&exam_type.exams_path()).await
    }

    /// 获取试卷（含完整结构树）
    pub async fn get_exam(&self, exam_type: ExamType, exam_id: u64) -> AppResult<Exam> {
        self.get_json(&exam_path(exam_type, exam_id)).await
    }

    /// 创建试卷记录，返回服务端ID
    pub async fn create_exam(&self, draft: &ExamDraft) -> AppResult<u64> {
        let created: CreatedExam = self
            .post_json(&draft.exam_type.exams_path(), &draft.normalized())
            .await?;
        Ok(created.id)
    }

    /// 让服务端为试卷生成部分 / 模块结构
    pub async fn create_structure(&self, exam_type: ExamType, exam_id: u64) -> AppResult<()> {
        let path = format!("{}create-structure/", exam_path(exam_type, exam_id));
        self.post_unit::<()>(&path, None).await
    }

    /// 整体更新试卷
    pub async fn update_exam(&self, exam: &Exam, exam_id: u64) -> AppResult<Exam> {
        self.put_json(&exam_path(exam.exam_type, exam_id), exam).await
    }

    /// 删除试卷
    pub async fn delete_exam(&self, exam_type: ExamType, exam_id: u64) -> AppResult<()> {
        self.delete(&exam_path(exam_type, exam_id)).await
    }

    /// 录入一道题目
    pub async fn create_question(
        &self,
        exam_type: ExamType,
        question: &AuthoredQuestion,
    ) -> AppResult<AuthoredQuestion> {
        self.post_json(&exam_type.questions_path(), question).await
    }
}
