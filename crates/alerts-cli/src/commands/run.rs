//! 알림 배치 실행.
//!
//! 로드 → 평가 → 뉴스 → 요약 → 전송(포트폴리오, 알파) → 상태 파일 순서로
//! 한 번 실행합니다. 각 단계의 실패는 그 단계의 기본값으로 대체되고,
//! 포지션이 없거나 상태 파일을 쓰지 못한 경우에만 실행이 실패합니다.

use std::path::{Path, PathBuf};

use alerts_core::format::{status_timestamp, summary_time_label};
use alerts_core::message::{alpha_message, portfolio_message};
use alerts_core::news::fetch_news_digest;
use alerts_core::{
    evaluate_positions, load_latest_positions, Alert, AlertsConfig, AlertsError, AlertsResult,
    Channel, NewsSource, PortfolioCounts, PortfolioSummary, Position, StatusReport,
    SUMMARY_ERROR_MESSAGE,
};
use alerts_notification::{deliver, ChannelMessage, MessageSender};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{error, info, warn};

/// 실행 설정.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// 스냅샷을 찾고 상태 파일을 쓸 디렉토리
    pub work_dir: PathBuf,
    /// 상태 파일 이름
    pub status_file: String,
    pub portfolio_channel_id: String,
    pub alpha_channel_id: String,
    pub timezone: Tz,
}

impl RunConfig {
    pub fn from_config(config: &AlertsConfig, work_dir: impl Into<PathBuf>) -> AlertsResult<Self> {
        Ok(Self {
            work_dir: work_dir.into(),
            status_file: config.status_file.clone(),
            portfolio_channel_id: config.portfolio_discord_channel_id.clone(),
            alpha_channel_id: config.alpha_discord_channel_id.clone(),
            timezone: config.tz()?,
        })
    }

    /// 상태 파일 경로.
    pub fn status_path(&self) -> PathBuf {
        self.work_dir.join(&self.status_file)
    }
}

/// 완료된 실행 결과.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub positions: usize,
    pub alerts: Vec<Alert>,
    pub portfolio_delivered: bool,
    pub alpha_delivered: bool,
    pub status_path: PathBuf,
}

/// 실행 결과.
#[derive(Debug)]
pub enum RunOutcome {
    /// 읽을 포지션이 없음 (전송/저장 없음)
    NoData,
    /// 모든 단계 완료 (전송 실패는 포함될 수 있음)
    Completed(RunReport),
    /// 상태 저장 등 복구할 수 없는 단계 실패
    Failed(AlertsError),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// 한 번의 알림 실행기.
pub struct AlertRunner<'a> {
    config: RunConfig,
    sender: &'a dyn MessageSender,
    news: &'a dyn NewsSource,
}

impl<'a> AlertRunner<'a> {
    pub fn new(config: RunConfig, sender: &'a dyn MessageSender, news: &'a dyn NewsSource) -> Self {
        Self {
            config,
            sender,
            news,
        }
    }

    /// 현재 시각으로 실행하고 성공 여부를 반환합니다.
    pub async fn run(&self) -> bool {
        let outcome = self.execute_at(Utc::now()).await;
        match &outcome {
            RunOutcome::Completed(report) => info!(
                positions = report.positions,
                alerts = report.alerts.len(),
                portfolio_delivered = report.portfolio_delivered,
                alpha_delivered = report.alpha_delivered,
                "Automated alerts completed successfully"
            ),
            RunOutcome::NoData => warn!("No positions data available"),
            RunOutcome::Failed(e) => error!(error = %e, "Error in automated alerts"),
        }
        outcome.is_success()
    }

    /// 주어진 시각 기준으로 실행합니다.
    pub async fn execute_at(&self, now: DateTime<Utc>) -> RunOutcome {
        let local = now.with_timezone(&self.config.timezone);
        info!(
            time = %status_timestamp(&local),
            dir = %self.config.work_dir.display(),
            "Starting automated trading alerts"
        );

        let positions = load_latest_positions(&self.config.work_dir).unwrap_or_else(|e| {
            error!(error = %e, "Error loading positions");
            Vec::new()
        });
        if positions.is_empty() {
            return RunOutcome::NoData;
        }

        let alerts = evaluate_positions(&positions);
        info!(count = alerts.len(), "Generated alerts");

        let news_digest = fetch_news_digest(self.news).await;

        let summary = match PortfolioSummary::build(&positions, &alerts) {
            Ok(summary) => summary.render(&summary_time_label(&local)),
            Err(e) => {
                error!(error = %e, "Error generating portfolio summary");
                SUMMARY_ERROR_MESSAGE.to_string()
            }
        };

        let portfolio = ChannelMessage::new(
            Channel::Portfolio,
            &self.config.portfolio_channel_id,
            portfolio_message(&summary, &alerts),
        );
        let portfolio_delivered = deliver(self.sender, &portfolio).await;

        let alpha = ChannelMessage::new(
            Channel::Alpha,
            &self.config.alpha_channel_id,
            alpha_message(&news_digest, &alerts),
        );
        let alpha_delivered = deliver(self.sender, &alpha).await;

        let status_path = self.config.status_path();
        if let Err(e) = write_status(&status_path, status_timestamp(&local), &positions, &alerts) {
            return RunOutcome::Failed(e);
        }

        RunOutcome::Completed(RunReport {
            positions: positions.len(),
            alerts,
            portfolio_delivered,
            alpha_delivered,
            status_path,
        })
    }
}

fn write_status(
    path: &Path,
    timestamp: String,
    positions: &[Position],
    alerts: &[Alert],
) -> AlertsResult<()> {
    let counts = PortfolioCounts::from_positions(positions)?;
    StatusReport::new(timestamp, alerts.to_vec(), counts).write_to(path)
}
