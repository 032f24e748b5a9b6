pub mod authoring;
pub mod dashboard;
pub mod exam;
pub mod question;
pub mod session;
pub mod user;

pub use authoring::{
    AuthoredQuestion, ChoiceOptions, Difficulty, Exam, ExamDraft, IeltsType, Module, ModulePath,
    ModuleUpdate, Section, SubType,
};
pub use dashboard::{
    ExamRecord, ExamScore, PerformanceEntry, SectionProgress, StudentDashboard, StudentReport,
};
pub use exam::{ExamData, ExamType};
pub use question::{Question, QuestionType};
pub use session::{AnswerSubmission, EndSessionRequest, ExamSession, ExamSubmission};
pub use user::{RegistrationForm, TokenPair, User};

/// 页面跳转目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// `/login`
    Login,
    /// `/dashboard`
    Dashboard,
    /// `/exams/{type}`
    ExamList(ExamType),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Login => "/login".to_string(),
            Navigation::Dashboard => "/dashboard".to_string(),
            Navigation::ExamList(t) => format!("/exams/{}", t.slug()),
        }
    }
}

impl std::fmt::Display for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
