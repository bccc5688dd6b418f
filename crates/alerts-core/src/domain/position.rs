//! 스냅샷 파일의 포지션 레코드.
//!
//! 스냅샷은 느슨한 키-값 레코드이므로, 로드 시점에 한 번 [`Position::from_record`]로
//! 기본값을 채운 명시적 구조체로 변환합니다.

use serde_json::{Map, Value};

/// 심볼/플랫폼이 없을 때 사용하는 값.
pub const UNKNOWN: &str = "Unknown";

/// 손절 미설정 표시.
pub const STOP_LOSS_UNSET_MARKER: &str = "❌";

/// 스냅샷 파일의 필드 이름 (JSON 키, CSV 헤더 공통).
pub mod fields {
    pub const SYMBOL: &str = "Symbol";
    pub const PLATFORM: &str = "Platform";
    pub const PNL_PERCENT: &str = "PnL %";
    pub const PNL_DOLLAR: &str = "PnL $";
    pub const MARGIN: &str = "Margin Size ($)";
    pub const STOP_LOSS: &str = "SL Set?";
    pub const ENTRY_PRICE: &str = "Entry Price";
    pub const MARK_PRICE: &str = "Mark Price";

    /// CSV 로드 시 실수로 변환하는 컬럼.
    pub const NUMERIC: [&str; 5] = [PNL_PERCENT, PNL_DOLLAR, MARGIN, ENTRY_PRICE, MARK_PRICE];
}

/// 스냅샷 시점의 보유 포지션.
///
/// 주요 수치 필드는 값이 없으면 `Some(0.0)`, 값은 있지만 숫자로 해석할 수
/// 없으면 `None`입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// 심볼
    pub symbol: String,
    /// 거래 플랫폼
    pub platform: String,
    /// 손익률 (%)
    pub pnl_percent: Option<f64>,
    /// 손익 금액 ($)
    pub pnl_dollar: Option<f64>,
    /// 증거금 ($)
    pub margin: Option<f64>,
    /// 손절 설정 여부
    pub stop_loss_set: bool,
    /// 진입가 (없거나 해석 불가면 `None`)
    pub entry_price: Option<f64>,
    /// 현재가 (없거나 해석 불가면 `None`)
    pub mark_price: Option<f64>,
}

impl Position {
    /// 수치가 모두 확정된 포지션을 생성합니다. 손절은 미설정 상태입니다.
    pub fn new(
        symbol: impl Into<String>,
        platform: impl Into<String>,
        pnl_percent: f64,
        pnl_dollar: f64,
        margin: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            platform: platform.into(),
            pnl_percent: Some(pnl_percent),
            pnl_dollar: Some(pnl_dollar),
            margin: Some(margin),
            stop_loss_set: false,
            entry_price: None,
            mark_price: None,
        }
    }

    /// 손절 설정 여부를 지정합니다.
    pub fn with_stop_loss(mut self, set: bool) -> Self {
        self.stop_loss_set = set;
        self
    }

    /// 스냅샷 레코드에서 기본값을 채워 포지션을 만듭니다.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            symbol: text_field(record, fields::SYMBOL),
            platform: text_field(record, fields::PLATFORM),
            pnl_percent: numeric_field(record, fields::PNL_PERCENT),
            pnl_dollar: numeric_field(record, fields::PNL_DOLLAR),
            margin: numeric_field(record, fields::MARGIN),
            stop_loss_set: stop_loss_field(record),
            entry_price: price_field(record, fields::ENTRY_PRICE),
            mark_price: price_field(record, fields::MARK_PRICE),
        }
    }

    /// 손익률, 손익 금액, 증거금이 모두 숫자인 경우 그 값을 반환합니다.
    pub fn primary_values(&self) -> Option<(f64, f64, f64)> {
        Some((self.pnl_percent?, self.pnl_dollar?, self.margin?))
    }
}

fn text_field(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn numeric_field(record: &Map<String, Value>, key: &str) -> Option<f64> {
    match record.get(key) {
        None | Some(Value::Null) => Some(0.0),
        Some(value) => parse_numeric(value),
    }
}

fn price_field(record: &Map<String, Value>, key: &str) -> Option<f64> {
    match record.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => parse_numeric(value),
    }
}

/// JSON 값을 실수로 해석합니다. 빈 문자열은 0으로 봅니다.
pub(crate) fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn stop_loss_field(record: &Map<String, Value>) -> bool {
    match record.get(fields::STOP_LOSS) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(set)) => *set,
        Some(Value::String(s)) => {
            let marker = s.trim();
            !marker.is_empty() && marker != STOP_LOSS_UNSET_MARKER
        }
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_record_fills_defaults() {
        let position = Position::from_record(&record(json!({})));

        assert_eq!(position.symbol, UNKNOWN);
        assert_eq!(position.platform, UNKNOWN);
        assert_eq!(position.primary_values(), Some((0.0, 0.0, 0.0)));
        assert!(!position.stop_loss_set);
        assert_eq!(position.entry_price, None);
    }

    #[test]
    fn test_from_record_reads_numbers_and_numeric_text() {
        let position = Position::from_record(&record(json!({
            "Symbol": "SOL",
            "Platform": "Blofin",
            "PnL %": "12.5",
            "PnL $": 40,
            "Margin Size ($)": " 250.0 ",
            "SL Set?": "✅",
            "Entry Price": 142.1,
            "Mark Price": "159.9"
        })));

        assert_eq!(position.symbol, "SOL");
        assert_eq!(position.platform, "Blofin");
        assert_eq!(position.primary_values(), Some((12.5, 40.0, 250.0)));
        assert!(position.stop_loss_set);
        assert_eq!(position.entry_price, Some(142.1));
        assert_eq!(position.mark_price, Some(159.9));
    }

    #[test]
    fn test_unparsable_primary_field_is_kept_as_none() {
        let position = Position::from_record(&record(json!({
            "Symbol": "ETH",
            "PnL %": "n/a",
            "Margin Size ($)": 300
        })));

        assert_eq!(position.pnl_percent, None);
        assert_eq!(position.margin, Some(300.0));
        assert_eq!(position.primary_values(), None);
    }

    #[test]
    fn test_stop_loss_markers() {
        let unset = Position::from_record(&record(json!({ "SL Set?": "❌" })));
        let empty = Position::from_record(&record(json!({ "SL Set?": "" })));
        let flag = Position::from_record(&record(json!({ "SL Set?": true })));

        assert!(!unset.stop_loss_set);
        assert!(!empty.stop_loss_set);
        assert!(flag.stop_loss_set);
    }

    #[test]
    fn test_non_string_symbol_is_rendered() {
        let position = Position::from_record(&record(json!({ "Symbol": 1000, "Platform": null })));
        assert_eq!(position.symbol, "1000");
        assert_eq!(position.platform, UNKNOWN);
    }
}
