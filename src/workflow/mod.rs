pub mod authoring;
pub mod authoring_flow;
pub mod countdown;
pub mod exam_runner;
pub mod exam_taking;

pub use authoring::{Advance, AuthoringCursor, AuthoringWizard};
pub use authoring_flow::{ExamAuthoring, QuestionAdded};
pub use countdown::Countdown;
pub use exam_runner::ExamRunner;
pub use exam_taking::{ExamPhase, ExamProgress, ExamTaking};
