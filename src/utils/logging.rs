/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::workflow::ExamProgress;

/// 初始化全局日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug / info 级别。
/// 重复调用不会报错。
///
/// # 参数
/// - `verbose`: 是否输出调试日志
pub fn init(verbose: bool) {
    let default_level = if verbose {
        "exam_portal_client=debug"
    } else {
        "exam_portal_client=info"
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 考试门户客户端启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 API 地址: {}", config.api_base_url);
    info!("⏱️ 考试时长: {} 秒", config.exam_duration_secs);
    info!("{}", "=".repeat(60));
}

/// 记录试卷加载信息
///
/// # 参数
/// - `name`: 试卷名称
/// - `total`: 题目总数
pub fn log_exam_loaded(name: &str, total: usize) {
    info!("✓ 已加载试卷 {}，共 {} 道题", name, total);
}

/// 记录交卷前的作答统计
///
/// # 参数
/// - `progress`: 作答进度
pub fn log_progress(progress: &ExamProgress) {
    info!("\n{}", "─".repeat(60));
    info!("📊 已作答: {}/{}", progress.answered, progress.total);
    info!("🚩 已标记: {}", progress.marked);
    info!("❔ 未作答: {}", progress.unanswered);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
