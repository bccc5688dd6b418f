//! 디스코드 알림 서비스.
//!
//! Discord REST API(`POST /channels/{id}/messages`)로 봇 토큰 인증 메시지를 전송합니다.

use std::time::Duration;

use alerts_core::AlertsConfig;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use tracing::{debug, info, warn};

use crate::types::{ChannelMessage, MessageSender, NotificationError, NotificationResult};

/// 요청 한도 초과 시 기본 대기 시간 (초).
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// 디스코드 전송 설정.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// 봇 토큰 (없으면 전송하지 않음)
    pub bot_token: Option<String>,
    /// API 기본 주소
    pub api_base: String,
    /// 요청 타임아웃
    pub timeout: Duration,
}

impl DiscordConfig {
    /// 기본 API 주소와 10초 타임아웃으로 설정을 생성합니다.
    pub fn new(bot_token: Option<String>) -> Self {
        Self {
            bot_token,
            api_base: alerts_core::config::DEFAULT_DISCORD_API_BASE.to_string(),
            timeout: Duration::from_secs(alerts_core::config::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// API 기본 주소를 설정합니다.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// 요청 타임아웃을 설정합니다.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn token(&self) -> Option<&str> {
        self.bot_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

impl From<&AlertsConfig> for DiscordConfig {
    fn from(config: &AlertsConfig) -> Self {
        Self::new(config.discord_token.clone())
            .with_api_base(config.discord_api_base.clone())
            .with_timeout(config.request_timeout())
    }
}

/// 디스코드 메시지 전송기.
pub struct DiscordSender {
    config: DiscordConfig,
    client: reqwest::Client,
}

impl DiscordSender {
    /// 새 디스코드 전송기를 생성합니다.
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn message_url(&self, channel_id: &str) -> String {
        format!(
            "{}/channels/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            channel_id
        )
    }
}

#[async_trait]
impl MessageSender for DiscordSender {
    async fn send(&self, message: &ChannelMessage) -> NotificationResult<()> {
        let Some(token) = self.config.token() else {
            return Err(NotificationError::Disabled(
                "Discord token not configured".to_string(),
            ));
        };
        if message.channel_id.trim().is_empty() {
            return Err(NotificationError::InvalidConfig(format!(
                "empty channel id for {}",
                message.channel
            )));
        }

        let url = self.message_url(&message.channel_id);
        let body = serde_json::json!({ "content": message.content });

        debug!(channel_id = %message.channel_id, "Sending Discord message");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bot {}", token))
            .json(&body)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(channel_id = %message.channel_id, "Discord message sent");
            return Ok(());
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok())
                .map(|secs| secs.ceil() as u64)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!(retry_after, "Discord rate limited");
            return Err(NotificationError::RateLimited(retry_after));
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::SendFailed(format!("HTTP {}: {}", status, body)))
    }

    fn is_enabled(&self) -> bool {
        self.config.token().is_some()
    }

    fn name(&self) -> &str {
        "discord"
    }
}
