use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// 考试类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Sat,
    Gmat,
    Gre,
    Ielts,
}

impl ExamType {
    /// URL 中使用的小写标识
    pub fn slug(self) -> &'static str {
        match self {
            ExamType::Sat => "sat",
            ExamType::Gmat => "gmat",
            ExamType::Gre => "gre",
            ExamType::Ielts => "ielts",
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            ExamType::Sat => "SAT",
            ExamType::Gmat => "GMAT",
            ExamType::Gre => "GRE",
            ExamType::Ielts => "IELTS",
        }
    }

    /// 从字符串解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sat" => Some(ExamType::Sat),
            "gmat" => Some(ExamType::Gmat),
            "gre" => Some(ExamType::Gre),
            "ielts" => Some(ExamType::Ielts),
            _ => None,
        }
    }

    /// 试卷资源路径，如 `sat-exams/`
    pub fn exams_path(self) -> String {
        format!("{}-exams/", self.slug())
    }

    /// 题目资源路径，如 `sat-questions/`
    pub fn questions_path(self) -> String {
        format!("{}-questions/", self.slug())
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一次考试加载的全部数据，加载后只读
#[derive(Debug, Clone, PartialEq)]
pub struct ExamData {
    pub id: u64,
    pub name: String,
    pub exam_type: Option<ExamType>,
    pub questions: Vec<Question>,
}

impl ExamData {
    pub fn new(id: u64, exam_type: Option<ExamType>, questions: Vec<Question>) -> Self {
        let name = match exam_type {
            Some(t) => format!("{} Exam", t.name()),
            None => "Unknown Exam".to_string(),
        };
        Self {
            id,
            name,
            exam_type,
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
