//! 메시지 타입 및 전송기 trait 정의.

use alerts_core::Channel;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// 채널로 보낼 텍스트 메시지.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// 논리 채널 (portfolio / alpha)
    pub channel: Channel,
    /// 메시징 서비스의 채널 ID
    pub channel_id: String,
    /// 본문
    pub content: String,
}

impl ChannelMessage {
    pub fn new(channel: Channel, channel_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            channel,
            channel_id: channel_id.into(),
            content: content.into(),
        }
    }
}

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("전송 비활성화: {0}")]
    Disabled(String),

    #[error("알림 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// 메시지 전송기 trait.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// 메시지를 전송합니다.
    async fn send(&self, message: &ChannelMessage) -> NotificationResult<()>;

    /// 전송기가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}

/// 메시지를 한 번 전송하고 성공 여부만 돌려줍니다.
///
/// 비활성화된 전송기는 호출하지 않습니다. 실패는 로그로만 남기며 재시도하지 않습니다.
pub async fn deliver(sender: &dyn MessageSender, message: &ChannelMessage) -> bool {
    if !sender.is_enabled() {
        warn!(
            sender = sender.name(),
            channel = %message.channel,
            "Sender not configured, skipping message"
        );
        return false;
    }

    match sender.send(message).await {
        Ok(()) => true,
        Err(NotificationError::Disabled(reason)) => {
            warn!(sender = sender.name(), channel = %message.channel, %reason, "Message skipped");
            false
        }
        Err(e) => {
            error!(
                sender = sender.name(),
                channel = %message.channel,
                channel_id = %message.channel_id,
                error = %e,
                "Failed to send message"
            );
            false
        }
    }
}
