//! 알림 파이프라인의 에러 타입.
//!
//! 각 단계(로드, 뉴스 조회, 요약, 상태 저장)는 `AlertsResult`를 반환하고,
//! 실행기는 에러를 로그로 남긴 뒤 단계별 기본값으로 대체합니다.

use thiserror::Error;

/// 파이프라인 에러.
#[derive(Debug, Error)]
pub enum AlertsError {
    /// 파일 입출력 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 파싱/직렬화 에러
    #[error("JSON 에러: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV 파싱 에러
    #[error("CSV 에러: {0}")]
    Csv(#[from] csv::Error),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 로깅 초기화 에러
    #[error("로깅 초기화 에러: {0}")]
    Logging(String),

    /// 뉴스 수집기가 구성되지 않음
    #[error("뉴스 모듈을 사용할 수 없습니다")]
    NewsUnavailable,

    /// 뉴스 조회 실패
    #[error("뉴스 조회 실패: {0}")]
    News(String),

    /// 포트폴리오 요약 생성 실패
    #[error("요약 생성 실패: {0}")]
    Summary(String),
}

/// 파이프라인 작업용 Result 타입.
pub type AlertsResult<T> = Result<T, AlertsError>;

impl AlertsError {
    /// 데이터가 없거나 외부 협력자가 없어서 발생한 에러인지 확인합니다.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AlertsError::NewsUnavailable)
    }
}

impl From<config::ConfigError> for AlertsError {
    fn from(err: config::ConfigError) -> Self {
        AlertsError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for AlertsError {
    fn from(err: reqwest::Error) -> Self {
        AlertsError::News(err.to_string())
    }
}
