use crate::core::{Record, Storage};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::path::Path;

/// 視為空值的儲存格內容（與常見資料分析工具的預設一致）
const NULL_TOKENS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// A parsed delimited file: header row plus one record per data row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

pub fn read_table(data: &[u8], delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(strip_bom(data));

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = if NULL_TOKENS.contains(&cell.trim()) {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            record.data.insert(header.clone(), value);
        }
        records.push(record);
    }

    Ok(Table { headers, records })
}

pub fn parse_delimited(data: &[u8], delimiter: u8) -> Result<Vec<Record>> {
    Ok(read_table(data, delimiter)?.records)
}

/// 解析 JSON Lines：每行一個 JSON 物件，空白行略過
pub fn parse_json_lines(source_file: &str, data: &[u8]) -> Result<Vec<Record>> {
    let text = std::str::from_utf8(strip_bom(data)).map_err(|e| EtlError::ParseError {
        source_file: source_file.to_string(),
        line: 0,
        message: format!("invalid UTF-8: {}", e),
    })?;

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parsed: Value = serde_json::from_str(line).map_err(|e| EtlError::ParseError {
            source_file: source_file.to_string(),
            line: index + 1,
            message: e.to_string(),
        })?;

        match parsed {
            Value::Object(obj) => records.push(Record {
                data: obj.into_iter().collect(),
            }),
            other => {
                return Err(EtlError::ParseError {
                    source_file: source_file.to_string(),
                    line: index + 1,
                    message: format!("expected a JSON object, found {}", json_kind(&other)),
                })
            }
        }
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn join_path(dir: &str, file: &str) -> String {
    Path::new(dir).join(file).to_string_lossy().into_owned()
}

/// Reads every `*.csv` file in `dir` and concatenates their rows.
pub fn read_delimited_files<S: Storage>(storage: &S, dir: &str, delimiter: u8) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for file in storage.list_files(dir, "csv")? {
        let path = join_path(dir, &file);
        let data = storage.read_file(&path)?;
        let parsed = parse_delimited(&data, delimiter)?;
        tracing::debug!("📄 {} - {} rows", path, parsed.len());
        records.extend(parsed);
    }

    Ok(records)
}

/// Reads every `*.json` (JSON Lines) file in `dir` and concatenates their records.
pub fn read_json_files<S: Storage>(storage: &S, dir: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for file in storage.list_files(dir, "json")? {
        let path = join_path(dir, &file);
        let data = storage.read_file(&path)?;
        let parsed = parse_json_lines(&path, &data)?;
        tracing::debug!("📄 {} - {} records", path, parsed.len());
        records.extend(parsed);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockStorage;

    #[test]
    fn test_parse_delimited_uses_header_row() {
        let data = b"eventType;playerName;age;runs;wickets\nODI;Player A;25;600;55\n";
        let records = parse_delimited(data, b';').unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get_text("playerName"), "Player A");
        assert_eq!(records[0].get_text("runs"), "600");
    }

    #[test]
    fn test_parse_delimited_empty_cells_are_null() {
        let data = b"eventType;playerName;age;runs;wickets\nTest;Player B;;450;NaN\n";
        let records = parse_delimited(data, b';').unwrap();

        assert!(records[0].get("age").is_none());
        assert!(records[0].get("wickets").is_none());
        assert!(records[0].get("runs").is_some());
    }

    #[test]
    fn test_parse_delimited_strips_byte_order_mark() {
        let data = b"\xEF\xBB\xBFeventType;playerName;age;runs;wickets\nODI;Player A;25;600;55\n";
        let table = read_table(data, b';').unwrap();

        assert_eq!(table.headers[0], "eventType");
        assert_eq!(table.records[0].get_text("eventType"), "ODI");
    }

    #[test]
    fn test_parse_json_lines_strips_byte_order_mark() {
        let data = b"\xEF\xBB\xBF{\"eventType\":\"ODI\",\"age\":25}\n";
        let records = parse_json_lines("players.json", data).unwrap();

        assert_eq!(records[0].get_text("eventType"), "ODI");
    }

    #[test]
    fn test_parse_delimited_ragged_row_fails() {
        let data = b"eventType;playerName;age\nODI;Player A;25;600\n";
        let err = parse_delimited(data, b';').unwrap_err();
        assert!(matches!(err, EtlError::CsvError(_)));
    }

    #[test]
    fn test_parse_json_lines() {
        let data = br#"{"eventType":"ODI","playerName":"Player A","age":25,"runs":600,"wickets":55}

{"eventType":"Test","playerName":"Player B","age":null,"runs":450}
"#;
        let records = parse_json_lines("players.json", data).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("age"), Some(&serde_json::json!(25)));
        assert!(records[1].get("age").is_none());
        assert!(records[1].get("wickets").is_none());
    }

    #[test]
    fn test_parse_json_lines_rejects_malformed_line() {
        let data = b"{\"age\":25}\n{not json}\n";
        match parse_json_lines("players.json", data) {
            Err(EtlError::ParseError { source_file, line, .. }) => {
                assert_eq!(source_file, "players.json");
                assert_eq!(line, 2);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_lines_rejects_top_level_array() {
        let data = b"[{\"age\":25}]\n";
        assert!(parse_json_lines("players.json", data).is_err());
    }

    #[test]
    fn test_read_files_by_extension_and_union_columns() {
        let storage = MockStorage::new();
        storage.insert("in/a.csv", "eventType;playerName;age;runs;wickets\nODI;A;25;600;55\n");
        storage.insert("in/b.csv", "playerName;age;runs;wickets;team\nB;30;100;60;X\n");
        storage.insert("in/c.json", "{\"playerName\":\"C\",\"age\":40}\n");
        storage.insert("in/notes.txt", "ignored");

        let csv_records = read_delimited_files(&storage, "in", b';').unwrap();
        let json_records = read_json_files(&storage, "in").unwrap();

        assert_eq!(csv_records.len(), 2);
        assert_eq!(json_records.len(), 1);
        assert_eq!(csv_records[0].get_text("playerName"), "A");
        assert!(csv_records[1].get("eventType").is_none());
        assert_eq!(csv_records[1].get_text("team"), "X");
    }

    #[test]
    fn test_read_files_empty_directory() {
        let storage = MockStorage::new();
        assert!(read_delimited_files(&storage, "in", b';').unwrap().is_empty());
        assert!(read_json_files(&storage, "in").unwrap().is_empty());
    }
}
