//! 금액/시각 표시 형식.

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

/// 요약 제목용 시각 형식 (예: `09:30 AM CDT`).
pub const SUMMARY_TIME_FORMAT: &str = "%I:%M %p %Z";
/// 상태 파일 타임스탬프 형식 (예: `2026-10-15 09:30 AM CDT`).
pub const STATUS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M %p %Z";

/// 달러 금액을 천 단위 구분자와 소수 둘째 자리로 표시합니다.
///
/// 부호는 달러 기호 뒤에 붙습니다.
///
/// ```
/// use rust_decimal_macros::dec;
/// use alerts_core::format::format_usd;
///
/// assert_eq!(format_usd(&dec!(1234.5)), "$1,234.50");
/// assert_eq!(format_usd(&dec!(-1000000)), "$-1,000,000.00");
/// ```
pub fn format_usd(value: &Decimal) -> String {
    let rounded = value.abs().round_dp(2);
    let formatted = format!("{:.2}", rounded);
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("${sign}{grouped}.{decimal_part}")
}

/// 요약 제목에 들어가는 현지 시각.
pub fn summary_time_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(SUMMARY_TIME_FORMAT).to_string()
}

/// 상태 파일에 기록하는 현지 타임스탬프.
pub fn status_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(STATUS_TIMESTAMP_FORMAT).to_string()
}
