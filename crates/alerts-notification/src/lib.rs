//! # Alerts Notification
//!
//! 포지션 알림 메시지 전송.
//!
//! 지원 채널:
//! - Discord (봇 토큰, REST API)

pub mod discord;
pub mod types;

pub use discord::*;
pub use types::*;
