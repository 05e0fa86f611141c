use crate::core::{PlayerRecord, PlayerType, Record, TransformResult};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::ops::RangeInclusive;

pub const AGE_RANGE: RangeInclusive<i64> = 15..=50;
pub const RUNS_THRESHOLD: i64 = 500;
pub const WICKETS_THRESHOLD: i64 = 50;

/// All-Rounder is checked first; both thresholds are strict.
pub fn classify(runs: i64, wickets: i64) -> PlayerType {
    if runs > RUNS_THRESHOLD && wickets > WICKETS_THRESHOLD {
        PlayerType::AllRounder
    } else if runs > RUNS_THRESHOLD {
        PlayerType::Batsman
    } else {
        PlayerType::Bowler
    }
}

/// 將數值或數字字串解析為浮點數（不截斷）
pub fn parse_number(field: &str, value: &Value) -> Result<f64> {
    let type_error = || EtlError::FieldTypeError {
        field: field.to_string(),
        value: value.to_string(),
    };

    let number = match value {
        Value::Number(n) => n.as_f64().ok_or_else(type_error)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| type_error())?,
        _ => return Err(type_error()),
    };

    if !number.is_finite() {
        return Err(type_error());
    }

    Ok(number)
}

/// 將數值或數字字串轉成整數，小數部分直接截斷
pub fn coerce_integer(field: &str, value: &Value) -> Result<i64> {
    let exact = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if let Some(i) = exact {
        return Ok(i);
    }

    let number = parse_number(field, value)?;
    if number.abs() >= i64::MAX as f64 {
        return Err(EtlError::FieldTypeError {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    Ok(number.trunc() as i64)
}

fn age_in_range(age: f64) -> bool {
    *AGE_RANGE.start() as f64 <= age && age <= *AGE_RANGE.end() as f64
}

/// Drops incomplete and out-of-range records and classifies the rest.
///
/// The age bounds apply to the untruncated age. Runs and wickets are
/// truncated before classification, so feeding the output back in returns
/// it unchanged.
pub fn transform(records: &[Record]) -> Result<TransformResult> {
    let mut result = TransformResult::default();

    for record in records {
        let (Some(runs), Some(wickets), Some(age)) =
            (record.get("runs"), record.get("wickets"), record.get("age"))
        else {
            result.dropped_missing += 1;
            continue;
        };

        let runs = coerce_integer("runs", runs)?;
        let wickets = coerce_integer("wickets", wickets)?;
        let raw_age = parse_number("age", age)?;

        if !age_in_range(raw_age) {
            result.dropped_out_of_range += 1;
            continue;
        }
        let age = coerce_integer("age", age)?;

        result.players.push(PlayerRecord {
            event_type: record.get_text("eventType"),
            player_name: record.get_text("playerName"),
            age,
            runs,
            wickets,
            player_type: classify(runs, wickets),
        });
    }

    tracing::debug!(
        "Transform kept {} records, dropped {} incomplete and {} out of age range",
        result.players.len(),
        result.dropped_missing,
        result.dropped_out_of_range
    );

    Ok(result)
}
