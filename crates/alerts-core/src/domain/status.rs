//! 마지막 실행 결과 상태 파일.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::alert::Alert;
use super::summary::PortfolioCounts;
use crate::error::AlertsResult;

/// 상태 파일 내용. 실행마다 전체를 덮어씁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// 현지 시각 타임스탬프
    pub timestamp: String,
    pub total_alerts: usize,
    pub alerts: Vec<Alert>,
    pub portfolio_summary: PortfolioCounts,
}

impl StatusReport {
    pub fn new(timestamp: impl Into<String>, alerts: Vec<Alert>, counts: PortfolioCounts) -> Self {
        Self {
            timestamp: timestamp.into(),
            total_alerts: alerts.len(),
            alerts,
            portfolio_summary: counts,
        }
    }

    /// 들여쓰기 2칸의 JSON 문자열.
    pub fn to_json_string(&self) -> AlertsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 파일에 기록합니다. 기존 내용은 덮어씁니다.
    pub fn write_to(&self, path: &Path) -> AlertsResult<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), alerts = self.total_alerts, "Status file written");
        Ok(())
    }

    /// 상태 파일을 읽습니다.
    pub fn read_from(path: &Path) -> AlertsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
