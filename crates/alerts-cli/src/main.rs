//! 포지션 알림 배치 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 현재 디렉토리의 positions_*.json / positions_*.csv 평가 후 전송
//! DISCORD_TOKEN=... position-alerts
//!
//! # 다른 디렉토리, 설정 파일, JSON 로그
//! position-alerts --dir /data/snapshots --config alerts.toml --log-format json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use alerts_cli::{AlertRunner, RunConfig};
use alerts_core::{
    init_logging, AlertsConfig, HttpNewsSource, LogConfig, LogFormat, NewsSource, UnavailableNews,
};
use alerts_notification::{DiscordConfig, DiscordSender};
use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "position-alerts")]
#[command(about = "포지션 스냅샷 임계값 알림 → Discord 요약 전송", long_about = None)]
#[command(version)]
struct Cli {
    /// 스냅샷 파일을 찾고 상태 파일을 쓸 디렉토리
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// TOML 설정 파일 (환경 변수가 우선)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 로깅 초기화
    let format: LogFormat = cli.log_format.parse().map_err(|e: String| anyhow!(e))?;
    init_logging(LogConfig::new(&cli.log_level).with_format(format))?;

    // 설정 로드
    let config =
        AlertsConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let run_config = RunConfig::from_config(&config, &cli.dir)?;

    let sender = DiscordSender::new(DiscordConfig::from(&config));
    let news: Box<dyn NewsSource> = match &config.news_url {
        Some(url) => Box::new(HttpNewsSource::new(url.clone(), config.request_timeout())),
        None => Box::new(UnavailableNews),
    };
    info!(news = news.name(), token = config.has_token(), "Configuration loaded");

    let success = AlertRunner::new(run_config, &sender, news.as_ref()).run().await;
    info!(success, "Run finished");

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
