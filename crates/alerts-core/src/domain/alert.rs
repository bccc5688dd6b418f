//! 규칙 평가 결과 알림.

use serde::{Deserialize, Serialize};

/// 과매도 시뮬레이션 RSI 값.
pub const SIMULATED_OVERSOLD_RSI: u32 = 20;
/// 과매수 시뮬레이션 RSI 값.
pub const SIMULATED_OVERBOUGHT_RSI: u32 = 85;

/// 알림 전송 채널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// 포트폴리오 요약 채널
    Portfolio,
    /// 알파(뉴스/오실레이터) 채널
    Alpha,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Alpha => "alpha",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알림 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// 큰 수익
    HighProfit,
    /// 손실 포지션
    LosingTrade,
    /// 과매도 (시뮬레이션)
    Oversold,
    /// 과매수 (시뮬레이션)
    Overbought,
    /// 손절 미설정
    NoStopLoss,
}

impl AlertKind {
    /// 직렬화 이름 (`high_profit` 등).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighProfit => "high_profit",
            Self::LosingTrade => "losing_trade",
            Self::Oversold => "oversold",
            Self::Overbought => "overbought",
            Self::NoStopLoss => "no_stop_loss",
        }
    }

    /// 알림이 전송될 채널.
    pub fn channel(&self) -> Channel {
        match self {
            Self::Oversold | Self::Overbought => Channel::Alpha,
            Self::HighProfit | Self::LosingTrade | Self::NoStopLoss => Channel::Portfolio,
        }
    }

    /// 요약에 표시할 제목 (`No Stop Loss` 등).
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 하나의 규칙이 발동한 결과.
///
/// 종류에 따라 `pnl`, `margin`, `rsi` 중 해당하는 값만 채워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub symbol: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    /// 전송용으로 미리 만든 메시지
    pub message: String,
    pub channel: Channel,
}

impl Alert {
    fn base(kind: AlertKind, symbol: &str, platform: &str, message: String) -> Self {
        Self {
            kind,
            symbol: symbol.to_string(),
            platform: platform.to_string(),
            rsi: None,
            pnl: None,
            margin: None,
            message,
            channel: kind.channel(),
        }
    }

    /// 큰 수익 알림.
    pub fn high_profit(symbol: &str, platform: &str, pnl_percent: f64) -> Self {
        let message = format!(
            "💰 {symbol} up {pnl_percent:.1}%! Consider rotating or trailing stops."
        );
        Self {
            pnl: Some(pnl_percent),
            ..Self::base(AlertKind::HighProfit, symbol, platform, message)
        }
    }

    /// 손실 포지션 알림.
    pub fn losing_trade(symbol: &str, platform: &str, pnl_percent: f64, margin: f64) -> Self {
        let message = format!(
            "🚨 {symbol} is down {pnl_percent:.1}%. Capital preservation - review position."
        );
        Self {
            pnl: Some(pnl_percent),
            margin: Some(margin),
            ..Self::base(AlertKind::LosingTrade, symbol, platform, message)
        }
    }

    /// 과매도 알림.
    pub fn oversold(symbol: &str, platform: &str, pnl_percent: f64) -> Self {
        let message = format!(
            "🟩 {symbol} is oversold at simulated RSI {SIMULATED_OVERSOLD_RSI}. Clean reversal setup detected."
        );
        Self {
            rsi: Some(SIMULATED_OVERSOLD_RSI),
            pnl: Some(pnl_percent),
            ..Self::base(AlertKind::Oversold, symbol, platform, message)
        }
    }

    /// 과매수 알림.
    pub fn overbought(symbol: &str, platform: &str, pnl_percent: f64) -> Self {
        let message = format!(
            "🟥 Alert! {symbol} RSI is {SIMULATED_OVERBOUGHT_RSI}. Consider exiting or trailing stop."
        );
        Self {
            rsi: Some(SIMULATED_OVERBOUGHT_RSI),
            pnl: Some(pnl_percent),
            ..Self::base(AlertKind::Overbought, symbol, platform, message)
        }
    }

    /// 손절 미설정 알림.
    pub fn no_stop_loss(symbol: &str, platform: &str, margin: f64) -> Self {
        let message = format!(
            "🛡️ {symbol} position (${margin:.0}) needs STOP LOSS for fast rotation!"
        );
        Self {
            margin: Some(margin),
            ..Self::base(AlertKind::NoStopLoss, symbol, platform, message)
        }
    }

    /// 알림을 발동시킨 값 (손익률, 증거금 또는 시뮬레이션 RSI).
    pub fn trigger_value(&self) -> f64 {
        match self.kind {
            AlertKind::HighProfit | AlertKind::LosingTrade => self.pnl.unwrap_or_default(),
            AlertKind::Oversold | AlertKind::Overbought => {
                self.rsi.map(f64::from).unwrap_or_default()
            }
            AlertKind::NoStopLoss => self.margin.unwrap_or_default(),
        }
    }
}
