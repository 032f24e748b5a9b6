//! 答案同步服务 - 业务能力层
//!
//! 只负责"把一道题的答案发给服务端"，失败只记日志，不重试。
//!
//! 正在进行中的提交不会因为切题而取消；交卷前通过 `drain` 等待它们全部结束，
//! 保证结束会话的请求不会抢在某个答案之前到达。

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::clients::PortalClient;
use crate::models::AnswerSubmission;
use crate::utils::logging::truncate_text;

/// 答案同步服务
pub struct AnswerSync {
    client: PortalClient,
    display_id: u64,
    pending: Vec<JoinHandle<()>>,
}

impl AnswerSync {
    pub fn new(client: PortalClient, display_id: u64) -> Self {
        Self {
            client,
            display_id,
            pending: Vec::new(),
        }
    }

    /// 后台提交答案，立即返回
    pub fn persist(&mut self, submission: AnswerSubmission) {
        self.pending.retain(|handle| !handle.is_finished());

        let client = self.client.clone();
        let display_id = self.display_id;
        let handle = tokio::spawn(async move {
            match client.submit_answer(display_id, &submission).await {
                Ok(()) => debug!(
                    "题目 {} 答案已保存: {}",
                    submission.question_id,
                    truncate_text(&submission.answer, 30)
                ),
                Err(e) => warn!("⚠️ 题目 {} 答案提交失败: {}", submission.question_id, e),
            }
        });
        self.pending.push(handle);
    }

    /// 尚未结束的提交数量
    pub fn in_flight(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }

    /// 等待所有已发出的提交结束
    pub async fn drain(&mut self) {
        let handles = std::mem::take(&mut self.pending);
        if handles.is_empty() {
            return;
        }
        debug!("等待 {} 个答案提交完成", handles.len());
        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("答案提交任务异常结束: {}", e);
            }
        }
    }
}
