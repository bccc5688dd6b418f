//! 채널별 전송 메시지 조립.

use crate::domain::{Alert, Channel};

/// 메시지 하나에 붙이는 최대 알림 수.
pub const MAX_ALERTS_PER_MESSAGE: usize = 5;

/// 알파 채널 메시지 제목.
pub const ALPHA_HEADER: &str = "🎯 **ALPHA HUNTING UPDATE**";

/// 특정 채널로 가는 알림만 고릅니다.
pub fn alerts_for(alerts: &[Alert], channel: Channel) -> Vec<&Alert> {
    alerts.iter().filter(|a| a.channel == channel).collect()
}

/// 포트폴리오 채널 메시지: 요약 + 포트폴리오 알림 목록.
pub fn portfolio_message(summary: &str, alerts: &[Alert]) -> String {
    let mut message = summary.to_string();
    append_alert_list(
        &mut message,
        "📋 **PORTFOLIO ALERTS:**",
        &alerts_for(alerts, Channel::Portfolio),
    );
    message
}

/// 알파 채널 메시지: 뉴스 요약 + 알파 알림 목록.
pub fn alpha_message(news_digest: &str, alerts: &[Alert]) -> String {
    let mut message = format!("{ALPHA_HEADER}\n\n{news_digest}");
    append_alert_list(
        &mut message,
        "🚀 **ALPHA ALERTS:**",
        &alerts_for(alerts, Channel::Alpha),
    );
    message
}

fn append_alert_list(message: &mut String, heading: &str, alerts: &[&Alert]) {
    if alerts.is_empty() {
        return;
    }
    message.push_str("\n\n");
    message.push_str(heading);
    for alert in alerts.iter().take(MAX_ALERTS_PER_MESSAGE) {
        message.push_str("\n• ");
        message.push_str(&alert.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_message_without_alerts_is_summary_only() {
        let alerts = vec![Alert::oversold("ETH", "Blofin", -20.0)];
        assert_eq!(portfolio_message("SUMMARY", &alerts), "SUMMARY");
    }

    #[test]
    fn test_portfolio_message_caps_alert_list() {
        let alerts: Vec<Alert> = (0..7)
            .map(|i| Alert::no_stop_loss(&format!("S{i}"), "P", 200.0))
            .collect();

        let message = portfolio_message("SUMMARY", &alerts);

        assert!(message.starts_with("SUMMARY\n\n📋 **PORTFOLIO ALERTS:**\n• "));
        assert_eq!(message.matches("\n• ").count(), MAX_ALERTS_PER_MESSAGE);
        assert!(message.contains("S4 position"));
        assert!(!message.contains("S5 position"));
    }

    #[test]
    fn test_alpha_message() {
        let alerts = vec![
            Alert::high_profit("BTC", "Blofin", 90.0),
            Alert::overbought("BTC", "Blofin", 90.0),
        ];

        assert_eq!(
            alpha_message("📰 No recent crypto news available", &alerts),
            "🎯 **ALPHA HUNTING UPDATE**\n\n📰 No recent crypto news available\n\n\
             🚀 **ALPHA ALERTS:**\n• 🟥 Alert! BTC RSI is 85. Consider exiting or trailing stop."
        );
        assert_eq!(
            alpha_message("NEWS", &[]),
            "🎯 **ALPHA HUNTING UPDATE**\n\nNEWS"
        );
    }
}
