//! 실행 설정.
//!
//! 우선순위 (낮음 → 높음):
//! 1. 내장 기본값
//! 2. TOML 설정 파일 (선택)
//! 3. `ALERTS_` 접두사 환경 변수 (예: `ALERTS_STATUS_FILE`)
//! 4. 메시징 서비스용 환경 변수 (`DISCORD_TOKEN`, `PORTFOLIO_DISCORD_CHANNEL_ID`,
//!    `ALPHA_DISCORD_CHANNEL_ID`)

use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AlertsError, AlertsResult};

/// 포트폴리오 채널 기본 ID.
pub const DEFAULT_PORTFOLIO_CHANNEL_ID: &str = "1399451217372905584";
/// 알파 채널 기본 ID.
pub const DEFAULT_ALPHA_CHANNEL_ID: &str = "1399790636990857277";
/// Discord REST API 기본 주소.
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v9";
/// 상태 파일 기본 이름.
pub const DEFAULT_STATUS_FILE: &str = "latest_alerts.json";
/// 메시지 타임스탬프에 사용하는 기본 시간대.
pub const DEFAULT_TIMEZONE: &str = "US/Central";
/// 외부 요청 타임아웃 기본값 (초).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// 메시징 서비스 변수 이름과 설정 키의 대응표.
const MESSAGING_ENV_VARS: [(&str, &str); 3] = [
    ("DISCORD_TOKEN", "discord_token"),
    ("PORTFOLIO_DISCORD_CHANNEL_ID", "portfolio_discord_channel_id"),
    ("ALPHA_DISCORD_CHANNEL_ID", "alpha_discord_channel_id"),
];

/// 알림 작업 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertsConfig {
    /// 메시징 서비스 봇 토큰 (없으면 전송을 건너뜀)
    #[serde(default)]
    pub discord_token: Option<String>,
    /// 포트폴리오 요약을 보낼 채널 ID
    pub portfolio_discord_channel_id: String,
    /// 알파/뉴스 요약을 보낼 채널 ID
    pub alpha_discord_channel_id: String,
    /// 메시징 API 기본 주소
    pub discord_api_base: String,
    /// 외부 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 상태 파일 이름 (작업 디렉토리 기준)
    pub status_file: String,
    /// 뉴스 피드 주소 (없으면 뉴스 요약 대신 안내 문구)
    #[serde(default)]
    pub news_url: Option<String>,
    /// 타임스탬프 시간대 (IANA 이름)
    pub timezone: String,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            discord_token: None,
            portfolio_discord_channel_id: DEFAULT_PORTFOLIO_CHANNEL_ID.to_string(),
            alpha_discord_channel_id: DEFAULT_ALPHA_CHANNEL_ID.to_string(),
            discord_api_base: DEFAULT_DISCORD_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            status_file: DEFAULT_STATUS_FILE.to_string(),
            news_url: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl AlertsConfig {
    /// `.env`, 설정 파일, 환경 변수를 차례로 읽어 설정을 만듭니다.
    pub fn load(path: Option<&Path>) -> AlertsResult<Self> {
        dotenvy::dotenv().ok();
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// 메시징 변수 조회 함수를 지정해 설정을 만듭니다.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> AlertsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("portfolio_discord_channel_id", defaults.portfolio_discord_channel_id)?
            .set_default("alpha_discord_channel_id", defaults.alpha_discord_channel_id)?
            .set_default("discord_api_base", defaults.discord_api_base)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("status_file", defaults.status_file)?
            .set_default("timezone", defaults.timezone)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(config::Environment::with_prefix("ALERTS"));

        for (var, key) in MESSAGING_ENV_VARS {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정값을 검증합니다.
    pub fn validate(&self) -> AlertsResult<()> {
        if self.status_file.trim().is_empty() {
            return Err(AlertsError::Config("status_file must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AlertsError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        self.tz()?;
        Ok(())
    }

    /// 토큰이 설정되어 있는지 확인합니다.
    pub fn has_token(&self) -> bool {
        self.discord_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    /// 타임스탬프 시간대를 파싱합니다.
    pub fn tz(&self) -> AlertsResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AlertsError::Config(format!("invalid timezone {}: {}", self.timezone, e)))
    }

    /// 외부 요청 타임아웃.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AlertsConfig::load_with(None, lookup_from(&[])).unwrap();

        assert_eq!(config.portfolio_discord_channel_id, DEFAULT_PORTFOLIO_CHANNEL_ID);
        assert_eq!(config.alpha_discord_channel_id, DEFAULT_ALPHA_CHANNEL_ID);
        assert_eq!(config.status_file, DEFAULT_STATUS_FILE);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(!config.has_token());
    }

    #[test]
    fn test_messaging_variables_override_defaults() {
        let config = AlertsConfig::load_with(
            None,
            lookup_from(&[
                ("DISCORD_TOKEN", "secret"),
                ("ALPHA_DISCORD_CHANNEL_ID", "42"),
                ("PORTFOLIO_DISCORD_CHANNEL_ID", ""),
            ]),
        )
        .unwrap();

        assert_eq!(config.discord_token.as_deref(), Some("secret"));
        assert_eq!(config.alpha_discord_channel_id, "42");
        // 빈 값은 설정되지 않은 것으로 본다
        assert_eq!(config.portfolio_discord_channel_id, DEFAULT_PORTFOLIO_CHANNEL_ID);
        assert!(config.has_token());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "status_file = \"run_status.json\"\nnews_url = \"http://localhost:9000/news\"\ntimezone = \"UTC\""
        )
        .unwrap();

        let config = AlertsConfig::load_with(Some(file.path()), lookup_from(&[])).unwrap();

        assert_eq!(config.status_file, "run_status.json");
        assert_eq!(config.news_url.as_deref(), Some("http://localhost:9000/news"));
        assert_eq!(config.tz().unwrap(), chrono_tz::Tz::UTC);
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let config = AlertsConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AlertsError::Config(_))));
    }
}
