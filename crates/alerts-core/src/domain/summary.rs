//! 포트폴리오 요약 집계와 렌더링.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::alert::{Alert, AlertKind};
use super::position::Position;
use crate::error::{AlertsError, AlertsResult};
use crate::format::format_usd;

/// 요약 생성에 실패했을 때 대신 보내는 문구.
pub const SUMMARY_ERROR_MESSAGE: &str = "❌ Error generating portfolio summary";

/// 알림 종류별 표시 이모지. 표에 없는 종류는 `⚠️`.
pub fn kind_emoji(kind: &str) -> &'static str {
    match kind {
        "oversold" => "🟩",
        "overbought" => "🟥",
        "high_profit" => "💰",
        "losing_trade" => "📉",
        "no_stop_loss" => "🛡️",
        _ => "⚠️",
    }
}

/// 포지션 개수 집계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioCounts {
    pub total_positions: usize,
    /// 손익률 > 0
    pub profitable_count: usize,
    /// 손익률 < 0
    pub losing_count: usize,
}

impl PortfolioCounts {
    /// 포지션 목록에서 개수를 집계합니다.
    ///
    /// 손익률을 해석할 수 없는 포지션이 있으면 에러를 반환합니다.
    pub fn from_positions(positions: &[Position]) -> AlertsResult<Self> {
        let mut counts = Self {
            total_positions: positions.len(),
            profitable_count: 0,
            losing_count: 0,
        };

        for position in positions {
            let pnl = position.pnl_percent.ok_or_else(|| {
                AlertsError::Summary(format!("unparsable PnL % for {}", position.symbol))
            })?;
            if pnl > 0.0 {
                counts.profitable_count += 1;
            } else if pnl < 0.0 {
                counts.losing_count += 1;
            }
        }

        Ok(counts)
    }
}

/// 한 번의 실행에 대한 포트폴리오 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub counts: PortfolioCounts,
    /// 손익 금액 합계
    pub total_pnl: Decimal,
    pub total_alerts: usize,
    /// 종류별 알림 수 (처음 등장한 순서)
    pub alert_counts: Vec<(AlertKind, usize)>,
}

impl PortfolioSummary {
    /// 포지션과 알림으로 요약을 집계합니다.
    pub fn build(positions: &[Position], alerts: &[Alert]) -> AlertsResult<Self> {
        let counts = PortfolioCounts::from_positions(positions)?;

        // 소수로 표현할 수 없는 금액(해석 불가, NaN 등)은 합계에서 제외
        let total_pnl = positions
            .iter()
            .filter_map(|p| p.pnl_dollar.and_then(Decimal::from_f64))
            .fold(Decimal::ZERO, |acc, pnl| acc + pnl);

        Ok(Self {
            counts,
            total_pnl,
            total_alerts: alerts.len(),
            alert_counts: histogram(alerts),
        })
    }

    /// 요약 텍스트를 만듭니다. `time_label`은 제목에 그대로 들어갑니다.
    pub fn render(&self, time_label: &str) -> String {
        let mut text = format!(
            "\n🎯 **PORTFOLIO SUMMARY - {time_label}**\n\n\
             📊 **Positions:** {} total | ✅ {} profitable | ❌ {} losing\n\
             💰 **Total PnL:** {}\n\n\
             🚨 **Alerts ({} total):**",
            self.counts.total_positions,
            self.counts.profitable_count,
            self.counts.losing_count,
            format_usd(&self.total_pnl),
            self.total_alerts,
        );

        for (kind, count) in &self.alert_counts {
            text.push_str(&format!(
                "\n{} {}: {}",
                kind_emoji(kind.as_str()),
                kind.title(),
                count
            ));
        }

        text
    }
}

fn histogram(alerts: &[Alert]) -> Vec<(AlertKind, usize)> {
    let mut counts: Vec<(AlertKind, usize)> = Vec::new();
    for alert in alerts {
        match counts.iter_mut().find(|(kind, _)| *kind == alert.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((alert.kind, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_pnl_is_neither_profitable_nor_losing() {
        let positions = vec![
            Position::new("A", "P", 10.0, 5.0, 50.0),
            Position::new("B", "P", -5.0, -2.0, 50.0),
            Position::new("C", "P", 0.0, 0.0, 50.0),
        ];

        let counts = PortfolioCounts::from_positions(&positions).unwrap();
        assert_eq!(counts.total_positions, 3);
        assert_eq!(counts.profitable_count, 1);
        assert_eq!(counts.losing_count, 1);
    }

    #[test]
    fn test_unparsable_pnl_percent_fails_counts() {
        let mut broken = Position::new("X", "P", 0.0, 0.0, 0.0);
        broken.pnl_percent = None;

        let result = PortfolioCounts::from_positions(&[broken]);
        assert!(matches!(result, Err(AlertsError::Summary(_))));
    }

    #[test]
    fn test_total_pnl_skips_unparsable_amounts() {
        let mut broken = Position::new("X", "P", 1.0, 0.0, 0.0);
        broken.pnl_dollar = None;
        let positions = vec![
            Position::new("A", "P", 10.0, 1200.25, 50.0),
            Position::new("B", "P", -5.0, -200.0, 50.0),
            broken,
        ];

        let summary = PortfolioSummary::build(&positions, &[]).unwrap();
        assert_eq!(summary.total_pnl, dec!(1000.25));
    }

    #[test]
    fn test_histogram_keeps_first_seen_order() {
        let alerts = vec![
            Alert::no_stop_loss("A", "P", 200.0),
            Alert::high_profit("B", "P", 60.0),
            Alert::no_stop_loss("C", "P", 300.0),
        ];

        let summary = PortfolioSummary::build(&[], &alerts).unwrap();
        assert_eq!(
            summary.alert_counts,
            vec![(AlertKind::NoStopLoss, 2), (AlertKind::HighProfit, 1)]
        );
    }

    #[test]
    fn test_render() {
        let positions = vec![
            Position::new("BTC", "Blofin", 60.0, 1500.0, 200.0),
            Position::new("ETH", "Blofin", -20.0, -250.5, 50.0).with_stop_loss(true),
        ];
        let alerts = vec![
            Alert::high_profit("BTC", "Blofin", 60.0),
            Alert::no_stop_loss("BTC", "Blofin", 200.0),
            Alert::losing_trade("ETH", "Blofin", -20.0, 50.0),
            Alert::oversold("ETH", "Blofin", -20.0),
        ];

        let text = PortfolioSummary::build(&positions, &alerts)
            .unwrap()
            .render("09:30 AM CDT");

        let expected = "\n🎯 **PORTFOLIO SUMMARY - 09:30 AM CDT**\n\n\
                        📊 **Positions:** 2 total | ✅ 1 profitable | ❌ 1 losing\n\
                        💰 **Total PnL:** $1,249.50\n\n\
                        🚨 **Alerts (4 total):**\n\
                        💰 High Profit: 1\n\
                        🛡️ No Stop Loss: 1\n\
                        📉 Losing Trade: 1\n\
                        🟩 Oversold: 1";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_kind_emoji_fallback() {
        assert_eq!(kind_emoji("overbought"), "🟥");
        assert_eq!(kind_emoji("margin_call"), "⚠️");
    }
}
