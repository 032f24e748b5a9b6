//! # Exam Portal Client
//!
//! 标准化考试（SAT / GMAT / GRE / IELTS）备考门户的客户端
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 连接），只暴露能力
//! - `HttpExecutor` - 唯一的 HTTP client owner，通过 `Transport` trait 发送请求
//!
//! ### ② 业务能力层（Clients / Services）
//! - `clients/` - `PortalClient`，负责认证头、401 刷新重试和各接口
//! - `services/` - `SessionStore`（token / 主题存储）、`AuthService`（登录注册）、
//!   `AnswerSync`（后台保存答案）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 纯状态机和把状态机接到接口上的流程
//! - `ExamTaking` / `ExamRunner` - 答题：导航、标记、倒计时、交卷
//! - `AuthoringWizard` / `ExamAuthoring` - 试卷录入：部分 → 模块 → 题目逐级推进
//!
//! ### ④ 编排层（Orchestration）
//! - `app` - 应用生命周期，分发终端输入和倒计时
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::PortalClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ApiRequest, ApiResponse, HttpExecutor, Transport};
pub use models::{ExamType, Navigation};
pub use services::{AuthService, SessionStore};
pub use workflow::{ExamAuthoring, ExamRunner, ExamTaking};
