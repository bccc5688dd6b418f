//! 포지션 스냅샷 로더.
//!
//! 작업 디렉토리에서 `positions_*.json`을 우선 찾고, 없을 때만
//! `positions_*.csv`를 찾습니다. 같은 형식 안에서는 가장 최근에 생성된
//! 파일을 사용합니다.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::position::{fields, parse_numeric};
use crate::domain::Position;
use crate::error::AlertsResult;

/// 스냅샷 파일 이름 접두사.
pub const POSITIONS_PREFIX: &str = "positions_";

/// 스냅샷 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// 레코드 배열 JSON
    Json,
    /// 헤더 행이 있는 CSV
    Csv,
}

impl SnapshotFormat {
    /// 선호 순서.
    pub const PREFERENCE: [SnapshotFormat; 2] = [SnapshotFormat::Json, SnapshotFormat::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(POSITIONS_PREFIX)
            && file_name
                .strip_suffix(self.extension())
                .is_some_and(|stem| stem.ends_with('.'))
    }
}

/// 선택된 스냅샷 파일.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub format: SnapshotFormat,
}

/// 선호 형식 순서대로 가장 최근 스냅샷 파일을 찾습니다.
pub fn find_latest_snapshot(dir: &Path) -> AlertsResult<Option<Snapshot>> {
    for format in SnapshotFormat::PREFERENCE {
        if let Some(path) = latest_with_format(dir, format)? {
            return Ok(Some(Snapshot { path, format }));
        }
    }
    Ok(None)
}

fn latest_with_format(dir: &Path, format: SnapshotFormat) -> AlertsResult<Option<PathBuf>> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !format.matches(name) {
            continue;
        }

        // 심볼릭 링크는 대상 파일 기준으로 판단
        let path = entry.path();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            continue;
        }
        // 생성 시각을 기록하지 않는 파일 시스템에서는 수정 시각 사용
        let created = metadata.created().or_else(|_| metadata.modified())?;

        let newer = match &latest {
            None => true,
            Some((time, current)) => (created, &path) > (*time, current),
        };
        if newer {
            latest = Some((created, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

/// 가장 최근 스냅샷의 포지션을 읽습니다. 파일이 없으면 빈 목록입니다.
pub fn load_latest_positions(dir: &Path) -> AlertsResult<Vec<Position>> {
    let Some(snapshot) = find_latest_snapshot(dir)? else {
        info!(dir = %dir.display(), "No positions files found");
        return Ok(Vec::new());
    };

    info!(path = %snapshot.path.display(), format = ?snapshot.format, "Loading positions");
    let positions = read_snapshot(&snapshot)?;
    info!(count = positions.len(), "Loaded positions");
    Ok(positions)
}

/// 스냅샷 파일 하나를 읽습니다.
pub fn read_snapshot(snapshot: &Snapshot) -> AlertsResult<Vec<Position>> {
    match snapshot.format {
        SnapshotFormat::Json => parse_json_positions(&fs::read_to_string(&snapshot.path)?),
        SnapshotFormat::Csv => parse_csv_positions(fs::File::open(&snapshot.path)?),
    }
}

/// 레코드 배열 JSON을 파싱합니다.
pub fn parse_json_positions(content: &str) -> AlertsResult<Vec<Position>> {
    let records: Vec<Map<String, Value>> = serde_json::from_str(content)?;
    Ok(records.iter().map(Position::from_record).collect())
}

/// 헤더 행이 있는 CSV를 파싱합니다.
///
/// 수치 컬럼은 실수로 변환하며, 변환할 수 없는 값은 0이 됩니다.
/// 빈 칸은 값이 없는 것으로 봅니다.
pub fn parse_csv_positions<R: Read>(reader: R) -> AlertsResult<Vec<Position>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut positions = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut record = Map::new();

        // 헤더보다 짧은 행의 나머지 컬럼은 값 없음
        for (header, raw) in headers.iter().zip(row.iter()) {
            record.insert(header.to_string(), csv_value(header, raw));
        }

        positions.push(Position::from_record(&record));
    }

    debug!(rows = positions.len(), "Parsed CSV snapshot");
    Ok(positions)
}

fn csv_value(header: &str, raw: &str) -> Value {
    if !fields::NUMERIC.contains(&header) || raw.is_empty() {
        return Value::String(raw.to_string());
    }
    let number = parse_numeric(&Value::String(raw.to_string()))
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    Value::from(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_file_names() {
        assert!(SnapshotFormat::Json.matches("positions_20261015.json"));
        assert!(SnapshotFormat::Csv.matches("positions_.csv"));
        assert!(!SnapshotFormat::Json.matches("positions_20261015.csv"));
        assert!(!SnapshotFormat::Json.matches("positions_20261015xjson"));
        assert!(!SnapshotFormat::Json.matches("old_positions_1.json"));
        assert!(!SnapshotFormat::Csv.matches("latest_alerts.json"));
    }

    #[test]
    fn test_parse_json_positions() {
        let content = r#"[
            {"Symbol": "BTC", "Platform": "Blofin", "PnL %": 60.0, "PnL $": 1500, "Margin Size ($)": 200, "SL Set?": "❌"},
            {"Symbol": "ETH", "PnL %": "-20", "Margin Size ($)": 50, "SL Set?": "✅"}
        ]"#;

        let positions = parse_json_positions(content).unwrap();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].primary_values(), Some((60.0, 1500.0, 200.0)));
        assert!(!positions[0].stop_loss_set);
        assert_eq!(positions[1].platform, "Unknown");
        assert_eq!(positions[1].pnl_percent, Some(-20.0));
        assert!(positions[1].stop_loss_set);
    }

    #[test]
    fn test_parse_json_rejects_non_list() {
        assert!(parse_json_positions(r#"{"Symbol": "BTC"}"#).is_err());
    }

    #[test]
    fn test_parse_csv_coerces_numeric_columns() {
        let content = "Symbol,Platform,PnL %,PnL $,Margin Size ($),SL Set?,Entry Price,Mark Price\n\
                       BTC,Blofin,61.5,1200.5,250,❌,60000,97000\n\
                       ETH,Blofin,oops,-30,n/a,✅,,3100\n";

        let positions = parse_csv_positions(content.as_bytes()).unwrap();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].primary_values(), Some((61.5, 1200.5, 250.0)));
        assert_eq!(positions[0].entry_price, Some(60000.0));
        assert!(!positions[0].stop_loss_set);

        assert_eq!(positions[1].primary_values(), Some((0.0, -30.0, 0.0)));
        assert_eq!(positions[1].entry_price, None);
        assert_eq!(positions[1].mark_price, Some(3100.0));
        assert!(positions[1].stop_loss_set);
    }

    #[test]
    fn test_parse_csv_short_rows() {
        let content = "Symbol,Platform,PnL %,Margin Size ($)\nSOL,Kraken\n";

        let positions = parse_csv_positions(content.as_bytes()).unwrap();

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "SOL");
        assert_eq!(positions[0].primary_values(), Some((0.0, 0.0, 0.0)));
    }
}
