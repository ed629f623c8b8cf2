//! Webhook 告警服务
//!
//! 上新通知和低库存告警通过可选的 webhook 推送出去。
//! 投递是尽力而为：在独立任务中发送，失败只记日志，
//! 绝不影响触发它的请求。

use std::time::Duration;

use crate::core::Config;

/// Webhook request timeout
const WEBHOOK_TIMEOUT_SECS: u64 = 5;

/// Fire-and-forget webhook notifier
///
/// 未配置 `NOTIFY_WEBHOOK_URL` 时为空转状态，[`Notifier::send`] 直接返回。
#[derive(Clone, Debug)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.notify_webhook_url.clone(),
        }
    }

    /// Whether a webhook URL is configured
    pub fn is_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }

    /// Deliver a message on a detached task
    ///
    /// Body: `{"message": "..."}`, POST, 5 秒超时。
    pub fn send(&self, message: impl Into<String>) {
        if !self.is_enabled() {
            return;
        }

        let client = self.client.clone();
        let url = self.webhook_url.clone();
        let message = message.into();

        tokio::spawn(async move {
            let result = client
                .post(&url)
                .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
                .json(&serde_json::json!({ "message": message }))
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(target: "notify", message = %message, "Webhook delivered");
                }
                Ok(resp) => {
                    tracing::warn!(
                        target: "notify",
                        status = %resp.status(),
                        message = %message,
                        "Webhook rejected"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        target: "notify",
                        error = %e,
                        message = %message,
                        "Webhook delivery failed"
                    );
                }
            }
        });
    }
}
