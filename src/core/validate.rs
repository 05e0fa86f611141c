use crate::core::ingest::{join_path, read_table};
use crate::core::{PlayerRecord, Record, Storage, ValidationReport, ValidationRow, Verdict};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Columns that must all be equal for an expected row to count as matched.
pub const JOIN_COLUMNS: [&str; 6] = [
    "playerName",
    "eventType",
    "age",
    "runs",
    "wickets",
    "playerType",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinKey {
    player_name: String,
    event_type: String,
    age: Option<i64>,
    runs: Option<i64>,
    wickets: Option<i64>,
    player_type: String,
}

impl JoinKey {
    pub fn from_player(player: &PlayerRecord) -> Self {
        Self {
            player_name: player.player_name.clone(),
            event_type: player.event_type.clone(),
            age: Some(player.age),
            runs: Some(player.runs),
            wickets: Some(player.wickets),
            player_type: player.player_type.as_str().to_string(),
        }
    }

    /// 參考檔的數值欄位只在是整數時才可能匹配
    pub fn from_actual(record: &Record) -> Self {
        Self {
            player_name: record.get_text("playerName"),
            event_type: record.get_text("eventType"),
            age: integral(record.get("age")),
            runs: integral(record.get("runs")),
            wickets: integral(record.get("wickets")),
            player_type: record.get_text("playerType"),
        }
    }
}

fn integral(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// `odi.csv` -> `ODI`
pub fn event_type_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Left join of the expected subset against the actual rows: one row per
/// player whose `event_type` equals `event_type`, in input order.
pub fn compare(
    players: &[PlayerRecord],
    event_type: &str,
    actual: &HashSet<JoinKey>,
) -> Vec<ValidationRow> {
    players
        .iter()
        .filter(|p| p.event_type == event_type)
        .map(|p| ValidationRow {
            record: p.clone(),
            result: if actual.contains(&JoinKey::from_player(p)) {
                Verdict::Pass
            } else {
                Verdict::Fail
            },
        })
        .collect()
}

pub fn parse_actual_rows(file: &str, data: &[u8], delimiter: u8) -> Result<HashSet<JoinKey>> {
    let table = read_table(data, delimiter)?;

    if let Some(column) = JOIN_COLUMNS
        .iter()
        .find(|column| !table.headers.iter().any(|h| h == *column))
    {
        return Err(EtlError::MissingColumnError {
            file: file.to_string(),
            column: column.to_string(),
        });
    }

    Ok(table.records.iter().map(JoinKey::from_actual).collect())
}

/// Checks `players` against every `*.csv` reference file in `dir`.
pub fn validate_against<S: Storage>(
    storage: &S,
    dir: &str,
    players: &[PlayerRecord],
    delimiter: u8,
) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    for file in storage.list_files(dir, "csv")? {
        let path = join_path(dir, &file);
        let data = storage.read_file(&path)?;
        let actual = parse_actual_rows(&path, &data, delimiter)?;
        let event_type = event_type_from_file_name(&file);

        let rows = compare(players, &event_type, &actual);
        let passed = rows.iter().filter(|r| r.result == Verdict::Pass).count();
        tracing::info!(
            "🔎 {} ({}) - {} expected, {} passed, {} failed",
            file,
            event_type,
            rows.len(),
            passed,
            rows.len() - passed
        );

        report.rows.extend(rows);
        report.files_checked += 1;
    }

    Ok(report)
}
