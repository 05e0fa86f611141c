use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 攝取階段產出的原始記錄：欄位名稱對應到未經型別轉換的值。
/// 缺少的欄位與 `Value::Null` 同樣視為空值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// 取得非空欄位值
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    /// 以字串形式讀取欄位，空值回傳空字串
    pub fn get_text(&self, key: &str) -> String {
        match self.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerType {
    AllRounder,
    Batsman,
    Bowler,
}

impl PlayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerType::AllRounder => "All-Rounder",
            PlayerType::Batsman => "Batsman",
            PlayerType::Bowler => "Bowler",
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player statistics after filtering, coercion and classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerRecord {
    pub event_type: String,
    pub player_name: String,
    pub age: i64,
    pub runs: i64,
    pub wickets: i64,
    pub player_type: PlayerType,
}

impl PlayerRecord {
    /// 轉回原始記錄，方便將已處理資料再次送入轉換流程
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("eventType", self.event_type.clone())
            .with("playerName", self.player_name.clone())
            .with("age", self.age)
            .with("runs", self.runs)
            .with("wickets", self.wickets)
            .with("playerType", self.player_type.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        }
    }
}

/// One expected record plus whether a matching actual row was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRow {
    pub record: PlayerRecord,
    pub result: Verdict,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub players: Vec<PlayerRecord>,
    pub dropped_missing: usize,
    pub dropped_out_of_range: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub rows: Vec<ValidationRow>,
    pub files_checked: usize,
}

impl ValidationReport {
    pub fn passed(&self) -> usize {
        self.rows.iter().filter(|r| r.result == Verdict::Pass).count()
    }

    pub fn failed(&self) -> usize {
        self.rows.iter().filter(|r| r.result == Verdict::Fail).count()
    }
}

/// Summary of one complete run, returned by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub csv_records: usize,
    pub json_records: usize,
    pub dropped_missing: usize,
    pub dropped_out_of_range: usize,
    pub processed: usize,
    pub passed: usize,
    pub failed: usize,
    pub processed_path: String,
    pub result_path: String,
}

/// Records read from the input directory, kept apart by source format.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub delimited: Vec<Record>,
    pub structured: Vec<Record>,
}

impl Extraction {
    /// 合併兩種來源：先分隔檔，後 JSON Lines
    pub fn into_records(self) -> Vec<Record> {
        let mut records = self.delimited;
        records.extend(self.structured);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_output_columns() {
        assert_eq!(PlayerType::AllRounder.to_string(), "All-Rounder");
        assert_eq!(PlayerType::Batsman.as_str(), "Batsman");
        assert_eq!(Verdict::Pass.as_str(), "PASS");
        assert_eq!(Verdict::Fail.as_str(), "FAIL");
    }

    #[test]
    fn test_run_report_serializes_counts_and_paths() {
        let now = Utc::now();
        let report = RunReport {
            started_at: now,
            finished_at: now,
            csv_records: 2,
            json_records: 1,
            dropped_missing: 0,
            dropped_out_of_range: 1,
            processed: 2,
            passed: 1,
            failed: 1,
            processed_path: "tempDataSet/processed_data.csv".to_string(),
            result_path: "test_result.csv".to_string(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["processed"], 2);
        assert_eq!(json["result_path"], "test_result.csv");
        assert!(json["started_at"].is_string());
    }
}
