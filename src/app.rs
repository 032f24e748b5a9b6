//! 编排层：应用生命周期
//!
//! 持有唯一的 HTTP 执行器和会话存储，把终端输入和倒计时分发给答题流程

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info, warn};

use crate::clients::PortalClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, StorageError};
use crate::infrastructure::{HttpExecutor, Transport};
use crate::models::Navigation;
use crate::services::{AuthService, SessionStore};
use crate::utils::logging;
use crate::workflow::countdown::ticker;
use crate::workflow::{ExamPhase, ExamRunner, ExamTaking};

const HELP: &str = "命令: <数字> 选择选项 | a <文本> 填写答案 | n 下一题 | p 上一题 | m 标记 | \
x <数字> 划掉选项 | i [文本] 批注 | s 交卷 | y 确认 | c 取消 | r 重试 | t 切换主题 | logout 登出 | q 退出";

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Select(usize),
    Answer(String),
    Next,
    Previous,
    Mark,
    Cross(usize),
    Annotate(Option<String>),
    Submit,
    Confirm,
    Cancel,
    Retry,
    Theme,
    Logout,
    Quit,
    Help,
}

impl Command {
    /// 解析一行输入；选项编号从 1 开始
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        if let Ok(n) = head.parse::<usize>() {
            return n.checked_sub(1).map(Command::Select);
        }

        let command = match head {
            "a" if !rest.is_empty() => Command::Answer(rest.to_string()),
            "n" => Command::Next,
            "p" => Command::Previous,
            "m" => Command::Mark,
            "x" => Command::Cross(rest.parse::<usize>().ok()?.checked_sub(1)?),
            "i" if rest.is_empty() => Command::Annotate(None),
            "i" => Command::Annotate(Some(rest.to_string())),
            "s" => Command::Submit,
            "y" => Command::Confirm,
            "c" => Command::Cancel,
            "r" => Command::Retry,
            "t" => Command::Theme,
            "logout" => Command::Logout,
            "q" => Command::Quit,
            "h" | "?" => Command::Help,
            _ => return None,
        };
        Some(command)
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    client: PortalClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::init(config.verbose_logging);
        logging::log_startup(&config);

        let store = Arc::new(SessionStore::load(&config.storage_path)?);
        let transport: Arc<dyn Transport> = Arc::new(HttpExecutor::new(&config)?);
        let client = PortalClient::new(transport, store);

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let auth = AuthService::new(self.client.clone());

        if self.client.store().access_token().is_none() && !self.login(&auth, &mut lines).await? {
            return Ok(());
        }

        if let Ok(Some(user)) = auth.current_user().await {
            info!("👤 当前用户: {} ({})", user.username, user.email);
        }

        let mut runner = ExamRunner::new(self.client.clone(), &self.config, self.config.exam_type);
        if let Err(e) = runner.bootstrap().await {
            if self.handle_error(&e) {
                return Ok(());
            }
        }
        render(runner.state());
        println!("{}", HELP);

        let mut timer = ticker();
        let mut expiry_reported = false;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    let remaining = runner.state_mut().tick();
                    if remaining == 0 && !expiry_reported {
                        expiry_reported = true;
                        warn!("⏰ 考试时间已到，请尽快交卷");
                    } else if remaining > 0 && remaining % 300 == 0 {
                        info!("⏱️ 剩余时间 {}", runner.state().countdown());
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.map_err(stdin_error)? else {
                        info!("输入结束，程序退出");
                        break;
                    };
                    let Some(command) = Command::parse(&line) else {
                        warn!("无法识别的命令: {}", line.trim());
                        continue;
                    };
                    match self.dispatch(&mut runner, &auth, command).await {
                        Ok(Some(navigation)) => {
                            info!("➡️ 跳转到 {}", navigation);
                            break;
                        }
                        Ok(None) => render(runner.state()),
                        Err(e) => {
                            if self.handle_error(&e) {
                                break;
                            }
                        }
                    }
                }
            }
        }

        self.client.store().save()
    }

    /// 执行一条命令，返回需要离开答题页时的跳转目标
    async fn dispatch(
        &self,
        runner: &mut ExamRunner,
        auth: &AuthService,
        command: Command,
    ) -> AppResult<Option<Navigation>> {
        match command {
            Command::Select(option) => runner.select_option(option)?,
            Command::Answer(text) => runner.write_answer(text)?,
            Command::Next => runner.state_mut().next()?,
            Command::Previous => {
                runner.state_mut().previous();
            }
            Command::Mark => {
                runner.state_mut().toggle_mark()?;
            }
            Command::Cross(option) => {
                runner.state_mut().toggle_cross(option)?;
            }
            Command::Annotate(None) => {
                runner.state_mut().toggle_annotation();
            }
            Command::Annotate(Some(text)) => runner.state_mut().set_annotation(text),
            Command::Submit => {
                runner.state_mut().request_submit()?;
                logging::log_progress(&runner.state().progress());
                println!("确认交卷？(y 确认 / c 取消)");
            }
            Command::Confirm => return runner.confirm_submit().await.map(Some),
            Command::Cancel => runner.state_mut().cancel_submit()?,
            Command::Retry => runner.retry().await?,
            Command::Theme => {
                let theme = self.client.store().toggle_theme()?;
                info!("🎨 主题已切换为 {:?}", theme);
            }
            Command::Logout => return auth.logout().await.map(Some),
            Command::Quit => return Ok(Some(Navigation::Dashboard)),
            Command::Help => println!("{}", HELP),
        }
        Ok(None)
    }

    /// 处理错误；需要离开答题页时返回 true
    fn handle_error(&self, e: &AppError) -> bool {
        if let Some(navigation) = e.redirect() {
            error!("🔒 {}，跳转到 {}", e, navigation);
            if let Err(clear_err) = self.client.store().clear_tokens() {
                warn!("清除登录凭证失败: {}", clear_err);
            }
            return true;
        }
        match e {
            AppError::Validation(v) => warn!("⚠️ {}", v),
            other => error!("❌ {}", other),
        }
        false
    }

    /// 终端登录，返回是否登录成功
    async fn login(&self, auth: &AuthService, lines: &mut Lines<BufReader<Stdin>>) -> AppResult<bool> {
        println!("请输入邮箱:");
        let Some(email) = lines.next_line().await.map_err(stdin_error)? else {
            return Ok(false);
        };
        println!("请输入密码:");
        let Some(password) = lines.next_line().await.map_err(stdin_error)? else {
            return Ok(false);
        };
        println!("记住登录状态？(y/n)");
        let remember = lines
            .next_line()
            .await
            .map_err(stdin_error)?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"));

        match auth.login(email.trim(), password.trim(), remember).await {
            Ok(_) => Ok(true),
            Err(e) => {
                self.handle_error(&e);
                Ok(false)
            }
        }
    }
}

fn stdin_error(source: std::io::Error) -> AppError {
    StorageError::ReadFailed {
        path: "stdin".to_string(),
        source,
    }
    .into()
}

/// 在终端显示当前题目
fn render(state: &ExamTaking) {
    match state.phase() {
        ExamPhase::Loading => println!("加载中..."),
        ExamPhase::Error(message) => println!("❌ {} (输入 r 重试)", message),
        ExamPhase::Submitted => println!("已交卷"),
        ExamPhase::Ready | ExamPhase::Confirming => {
            let Some(question) = state.current_question() else {
                return;
            };
            let index = state.current_index();
            let name = state.exam().map_or("", |exam| exam.name.as_str());

            println!("\n{}", "─".repeat(60));
            println!(
                "{} | 第 {}/{} 题 | 剩余 {}{}",
                name,
                index + 1,
                state.len(),
                state.countdown(),
                if state.marked()[index] { " | 🚩" } else { "" }
            );
            println!("{}", question.text);
            for (j, option) in question.options.iter().enumerate() {
                let chosen = state.answers()[index] == *option;
                let crossed = state.crossed()[index].get(j).copied().unwrap_or(false);
                println!(
                    "  {}{}. {}{}",
                    if chosen { "●" } else { " " },
                    j + 1,
                    option,
                    if crossed { " (已划掉)" } else { "" }
                );
            }
            if !question.question_type.is_choice() && !state.answers()[index].is_empty() {
                println!("  答案: {}", state.answers()[index]);
            }
            if state.annotation_visible() {
                println!("  批注: {}", state.annotation());
            }
            if state.show_error() {
                println!("  ⚠️ 请先作答或标记本题");
            }
        }
    }
}
