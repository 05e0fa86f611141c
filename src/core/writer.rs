use crate::core::{PlayerRecord, ValidationRow};
use crate::utils::error::{EtlError, Result};

pub const PLAYER_COLUMNS: [&str; 6] = [
    "eventType",
    "playerName",
    "age",
    "runs",
    "wickets",
    "playerType",
];

pub const RESULT_COLUMN: &str = "Result";

fn player_fields(player: &PlayerRecord) -> [String; 6] {
    [
        player.event_type.clone(),
        player.player_name.clone(),
        player.age.to_string(),
        player.runs.to_string(),
        player.wickets.to_string(),
        player.player_type.to_string(),
    ]
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| {
        let cause = e.error();
        EtlError::IoError(std::io::Error::new(cause.kind(), cause.to_string()))
    })
}

/// 輸出已處理資料；即使沒有資料也會寫出標題列
pub fn players_to_delimited(players: &[PlayerRecord], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(PLAYER_COLUMNS)?;
    for player in players {
        writer.write_record(player_fields(player))?;
    }

    finish(writer)
}

pub fn validation_to_delimited(rows: &[ValidationRow], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(PLAYER_COLUMNS.iter().chain(std::iter::once(&RESULT_COLUMN)))?;
    for row in rows {
        let fields = player_fields(&row.record);
        writer.write_record(
            fields
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(row.result.as_str())),
        )?;
    }

    finish(writer)
}
