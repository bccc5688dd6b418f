//! 시장 뉴스 요약.
//!
//! 뉴스 수집기는 선택 사항입니다. 구성되지 않았거나 조회에 실패하면
//! 고정 안내 문구로 대체합니다.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AlertsError, AlertsResult};

/// 뉴스 조회 기간 (시간).
pub const NEWS_LOOKBACK_HOURS: u32 = 6;
/// 최대 뉴스 개수.
pub const NEWS_MAX_ITEMS: usize = 20;
/// 헤드라인 최대 길이 (문자).
pub const HEADLINE_MAX_CHARS: usize = 100;

/// 뉴스가 하나도 없을 때의 문구.
pub const NO_NEWS_MESSAGE: &str = "📰 No recent crypto news available";
/// 뉴스 수집기를 사용할 수 없을 때의 문구.
pub const NEWS_UNAVAILABLE_MESSAGE: &str = "📰 Crypto news module not available";

/// 뉴스 기사.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    /// `Positive`, `Negative` 외의 값은 집계하지 않음
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, sentiment: Option<&str>) -> Self {
        Self {
            title: title.into(),
            sentiment: sentiment.map(str::to_string),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.sentiment.as_deref() == Some("Positive")
    }

    pub fn is_negative(&self) -> bool {
        self.sentiment.as_deref() == Some("Negative")
    }
}

/// 뉴스 수집기.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// 최근 `hours`시간 동안의 뉴스를 최대 `limit`개 조회합니다.
    async fn fetch(&self, hours: u32, limit: usize) -> AlertsResult<Vec<NewsItem>>;

    fn name(&self) -> &str;
}

/// 뉴스 수집기가 구성되지 않은 경우.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableNews;

#[async_trait]
impl NewsSource for UnavailableNews {
    async fn fetch(&self, _hours: u32, _limit: usize) -> AlertsResult<Vec<NewsItem>> {
        Err(AlertsError::NewsUnavailable)
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// JSON 배열을 돌려주는 HTTP 뉴스 피드.
///
/// `GET {url}?hours={hours}&items={limit}`
pub struct HttpNewsSource {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpNewsSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn fetch(&self, hours: u32, limit: usize) -> AlertsResult<Vec<NewsItem>> {
        debug!(url = %self.url, hours, limit, "Fetching news");

        let response = self
            .client
            .get(&self.url)
            .query(&[("hours", hours.to_string()), ("items", limit.to_string())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertsError::News(format!("HTTP {}", status)));
        }

        let mut items: Vec<NewsItem> = response.json().await?;
        items.truncate(limit);
        Ok(items)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// 조회 결과로 뉴스 요약 문구를 만듭니다.
pub fn news_digest(result: AlertsResult<Vec<NewsItem>>) -> String {
    let items = match result {
        Ok(items) => items,
        Err(e) if e.is_unavailable() => {
            warn!("Crypto news source not configured");
            return NEWS_UNAVAILABLE_MESSAGE.to_string();
        }
        Err(e) => {
            warn!(error = %e, "Crypto news unavailable");
            return NEWS_UNAVAILABLE_MESSAGE.to_string();
        }
    };

    let Some(top) = items.first() else {
        return NO_NEWS_MESSAGE.to_string();
    };

    let bullish = items.iter().filter(|n| n.is_positive()).count();
    let bearish = items.iter().filter(|n| n.is_negative()).count();
    let headline: String = top.title.chars().take(HEADLINE_MAX_CHARS).collect();

    format!(
        "📰 News: {} articles | 📈 Bullish: {} | 📉 Bearish: {}\n🔥 Breaking: {}...",
        items.len(),
        bullish,
        bearish,
        headline
    )
}

/// 뉴스 수집기를 호출해 요약 문구를 만듭니다.
pub async fn fetch_news_digest(source: &dyn NewsSource) -> String {
    news_digest(source.fetch(NEWS_LOOKBACK_HOURS, NEWS_MAX_ITEMS).await)
}
