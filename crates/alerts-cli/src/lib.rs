//! 포지션 알림 배치 작업.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 스냅샷 → 규칙 평가 → 메시지 전송 → 상태 파일로 이어지는 실행기
//! - `position-alerts` 바이너리

pub mod commands;

pub use commands::run::{AlertRunner, RunConfig, RunOutcome, RunReport};
