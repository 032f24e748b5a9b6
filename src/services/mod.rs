pub mod answer_sync;
pub mod auth_service;
pub mod session_store;

pub use answer_sync::AnswerSync;
pub use auth_service::AuthService;
pub use session_store::{SessionStore, Theme, TokenScope};
