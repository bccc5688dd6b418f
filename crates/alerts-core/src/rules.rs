//! 포지션 임계값 규칙.
//!
//! 규칙 그룹은 서로 독립적으로 평가하고, 그룹 안에서는 먼저 만족한 조건
//! 하나만 발동합니다.
//!
//! | 그룹 | 조건 | 알림 |
//! |---|---|---|
//! | 손익 | 손익률 > 50 / 손익률 < -10 | `high_profit` / `losing_trade` |
//! | 오실레이터 | 손익률 < -15 / 손익률 > 80 | `oversold` / `overbought` |
//! | 보호 | 손절 미설정 그리고 증거금 > 100 | `no_stop_loss` |

use tracing::debug;

use crate::domain::{Alert, Position};

/// 큰 수익 기준 손익률 (%).
pub const HIGH_PROFIT_PCT: f64 = 50.0;
/// 손실 포지션 기준 손익률 (%).
pub const LOSING_TRADE_PCT: f64 = -10.0;
/// 과매도 시뮬레이션 기준 손익률 (%).
pub const OVERSOLD_PCT: f64 = -15.0;
/// 과매수 시뮬레이션 기준 손익률 (%).
pub const OVERBOUGHT_PCT: f64 = 80.0;
/// 손절 없이 허용되는 최대 증거금 ($).
pub const UNPROTECTED_MARGIN_LIMIT: f64 = 100.0;

/// 포지션 하나에서 발동할 수 있는 최대 알림 수 (그룹당 하나).
pub const MAX_ALERTS_PER_POSITION: usize = 3;

/// 모든 포지션을 평가합니다.
pub fn evaluate_positions(positions: &[Position]) -> Vec<Alert> {
    positions.iter().flat_map(evaluate_position).collect()
}

/// 포지션 하나를 평가합니다.
///
/// 손익률, 손익 금액, 증거금 중 하나라도 숫자가 아니면 알림 없이 건너뜁니다.
pub fn evaluate_position(position: &Position) -> Vec<Alert> {
    let Some((pnl_percent, _pnl_dollar, margin)) = position.primary_values() else {
        debug!(symbol = %position.symbol, "Skipping position with unparsable values");
        return Vec::new();
    };

    let symbol = position.symbol.as_str();
    let platform = position.platform.as_str();
    let mut alerts = Vec::with_capacity(MAX_ALERTS_PER_POSITION);

    if pnl_percent > HIGH_PROFIT_PCT {
        alerts.push(Alert::high_profit(symbol, platform, pnl_percent));
    } else if pnl_percent < LOSING_TRADE_PCT {
        alerts.push(Alert::losing_trade(symbol, platform, pnl_percent, margin));
    }

    if pnl_percent < OVERSOLD_PCT {
        alerts.push(Alert::oversold(symbol, platform, pnl_percent));
    } else if pnl_percent > OVERBOUGHT_PCT {
        alerts.push(Alert::overbought(symbol, platform, pnl_percent));
    }

    if !position.stop_loss_set && margin > UNPROTECTED_MARGIN_LIMIT {
        alerts.push(Alert::no_stop_loss(symbol, platform, margin));
    }

    for alert in &alerts {
        debug!(kind = %alert.kind, symbol, value = alert.trigger_value(), "Alert triggered");
    }
    alerts
}
