use serde::{Deserialize, Serialize};

use crate::models::exam::ExamType;
use crate::models::question::QuestionType;

/// 模块难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Standard,
    Hard,
}

/// 题目子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubType {
    #[default]
    Simple,
    Math,
    Graph,
}

/// IELTS 类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IeltsType {
    Academic,
    General,
}

/// A-D 四个选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOptions {
    #[serde(rename = "A", default)]
    pub a: String,
    #[serde(rename = "B", default)]
    pub b: String,
    #[serde(rename = "C", default)]
    pub c: String,
    #[serde(rename = "D", default)]
    pub d: String,
}

/// 录入中的题目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoredQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<u64>,
    #[serde(default)]
    pub passage: String,
    pub text: String,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<SubType>,
    #[serde(default)]
    pub options: ChoiceOptions,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<u32>,
}

/// 模块：一个部分下的一组题目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// 时长（分钟）
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub questions: Vec<AuthoredQuestion>,
}

impl Module {
    /// 属于指定题组（从 1 开始）的题目数量
    pub fn questions_in_set(&self, set: u32) -> usize {
        self.questions
            .iter()
            .filter(|q| q.set == Some(set))
            .count()
    }
}

/// 试卷的一个部分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// 完整的试卷结构树
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub exam_type: ExamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ielts_type: Option<IeltsType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// 新建试卷表单
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamDraft {
    pub name: String,
    pub exam_type: ExamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ielts_type: Option<IeltsType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ExamDraft {
    pub fn new(name: impl Into<String>, exam_type: ExamType) -> Self {
        Self {
            name: name.into(),
            exam_type,
            ielts_type: None,
            instructions: None,
        }
    }

    /// 只有 IELTS 才提交 ielts_type
    pub fn normalized(&self) -> Self {
        let mut draft = self.clone();
        if draft.exam_type != ExamType::Ielts {
            draft.ielts_type = None;
        }
        draft
    }
}

/// 服务端创建试卷后的返回（只关心 ID）
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedExam {
    pub id: u64,
}

/// 按索引定位模块的路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModulePath {
    pub section: usize,
    pub module: usize,
}

impl ModulePath {
    pub fn new(section: usize, module: usize) -> Self {
        Self { section, module }
    }
}

/// 模块的单字段更新
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleUpdate {
    Name(String),
    Difficulty(Difficulty),
    Duration(u32),
    QuestionCount(u32),
    Instructions(String),
}

impl Exam {
    pub fn module(&self, path: ModulePath) -> Option<&Module> {
        self.sections.get(path.section)?.modules.get(path.module)
    }

    pub fn module_mut(&mut self, path: ModulePath) -> Option<&mut Module> {
        self.sections
            .get_mut(path.section)?
            .modules
            .get_mut(path.module)
    }

    /// 所有模块中已录入的题目总数
    pub fn question_total(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.modules.iter())
            .map(|m| m.questions.len())
            .sum()
    }
}

impl Module {
    pub fn apply(&mut self, update: ModuleUpdate) {
        match update {
            ModuleUpdate::Name(name) => self.name = name,
            ModuleUpdate::Difficulty(difficulty) => self.difficulty = difficulty,
            ModuleUpdate::Duration(duration) => self.duration = duration,
            ModuleUpdate::QuestionCount(count) => self.question_count = count,
            ModuleUpdate::Instructions(text) => self.instructions = Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_tree_from_backend() {
        let exam: Exam = serde_json::from_str(
            r#"{
                "id": 7, "name": "Mock 1", "exam_type": "sat",
                "created_at": "2024-01-01T00:00:00Z",
                "sections": [
                    {"id": 1, "name": "verbal", "order": 1, "modules": [
                        {"id": 11, "name": "reading_standard", "duration": 32, "question_count": 27, "difficulty": "standard", "order": 1, "questions": []}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        let module = exam.module(ModulePath::new(0, 0)).unwrap();
        assert_eq!(module.id, Some(11));
        assert_eq!(module.question_count, 27);
        assert!(exam.module(ModulePath::new(0, 1)).is_none());
        assert!(exam.module(ModulePath::new(3, 0)).is_none());
    }

    #[test]
    fn test_draft_drops_ielts_type_for_other_exams() {
        let mut draft = ExamDraft::new("Practice", ExamType::Sat);
        draft.ielts_type = Some(IeltsType::Academic);
        let json = serde_json::to_value(draft.normalized()).unwrap();
        assert!(json.get("ielts_type").is_none());
        assert_eq!(json["exam_type"], "sat");
    }

    #[test]
    fn test_options_use_letter_keys() {
        let options = ChoiceOptions {
            a: "1".into(),
            b: "2".into(),
            c: "3".into(),
            d: "4".into(),
        };
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["C"], "3");
    }
}
