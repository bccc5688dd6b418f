//! # Alerts Core
//!
//! 포지션 스냅샷을 읽어 임계값 규칙으로 알림을 만들고, 채널별 요약 메시지와
//! 상태 파일을 생성합니다.
//!
//! 구성:
//! - 포지션/알림/요약/상태 파일 도메인 타입
//! - 스냅샷 로더 (JSON 우선, CSV 대체)
//! - 규칙 평가기
//! - 뉴스 요약 협력자
//! - 설정 및 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod loader;
pub mod logging;
pub mod message;
pub mod news;
pub mod rules;

pub use config::AlertsConfig;
pub use domain::*;
pub use error::*;
pub use loader::{load_latest_positions, SnapshotFormat};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use news::{HttpNewsSource, NewsItem, NewsSource, UnavailableNews};
pub use rules::evaluate_positions;
