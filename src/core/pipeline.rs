use crate::core::ingest::{join_path, read_delimited_files, read_json_files};
use crate::core::{
    transform, validate, writer, ConfigProvider, Extraction, Pipeline, Record, Storage,
    TransformResult, ValidationReport,
};
use crate::utils::error::Result;

/// Player statistics pipeline: input directory -> processed file -> validation result.
pub struct PlayerPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PlayerPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for PlayerPipeline<S, C> {
    fn extract(&self) -> Result<Extraction> {
        let dir = self.config.input_dir();
        tracing::debug!("Reading input files from: {}", dir);

        let delimited = read_delimited_files(&self.storage, dir, self.config.delimiter())?;
        let structured = read_json_files(&self.storage, dir)?;

        tracing::info!(
            "📥 Read {} delimited and {} JSON records from {}",
            delimited.len(),
            structured.len(),
            dir
        );

        Ok(Extraction {
            delimited,
            structured,
        })
    }

    fn prepare(&self) -> Result<()> {
        let dir = self.config.temp_dir();
        if self.storage.ensure_dir(dir)? {
            tracing::info!("📁 Directory '{}' created.", dir);
        } else {
            tracing::info!("📁 Directory '{}' already exists.", dir);
        }
        Ok(())
    }

    fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        transform::transform(&data)
    }

    fn load(&self, result: &TransformResult) -> Result<String> {
        let path = join_path(self.config.temp_dir(), self.config.processed_file());
        let data = writer::players_to_delimited(&result.players, self.config.delimiter())?;

        tracing::debug!("Writing {} processed records ({} bytes)", result.players.len(), data.len());
        self.storage.write_file(&path, &data)?;

        tracing::info!("💾 Data has been merged and stored in: {}", path);
        Ok(path)
    }

    fn validate(&self, result: &TransformResult) -> Result<ValidationReport> {
        validate::validate_against(
            &self.storage,
            self.config.output_dir(),
            &result.players,
            self.config.delimiter(),
        )
    }

    fn report(&self, report: &ValidationReport) -> Result<String> {
        let path = self.config.result_file().to_string();
        let data = writer::validation_to_delimited(&report.rows, self.config.delimiter())?;

        self.storage.write_file(&path, &data)?;
        tracing::info!("🧾 Validation result stored in: {}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EtlConfig;
    use crate::core::test_support::MockStorage;
    use crate::core::{PlayerType, Verdict};

    const PLAYERS_CSV: &str = "\
eventType;playerName;age;runs;wickets
ODI;Player A;25;600;55
Test;Player B;40;450;10
ODI;Too Young;14;900;90
";

    const PLAYERS_JSON: &str = r#"{"eventType":"ODI","playerName":"Player D","age":30,"runs":700,"wickets":12}
{"eventType":"ODI","playerName":"No Runs","age":30,"wickets":12}
"#;

    fn pipeline(storage: MockStorage) -> PlayerPipeline<MockStorage, EtlConfig> {
        PlayerPipeline::new(storage, EtlConfig::default())
    }

    #[test]
    fn test_extract_keeps_sources_apart() {
        let storage = MockStorage::new();
        storage.insert("inputDataSet/players.csv", PLAYERS_CSV);
        storage.insert("inputDataSet/players.json", PLAYERS_JSON);

        let extraction = pipeline(storage).extract().unwrap();

        assert_eq!(extraction.delimited.len(), 3);
        assert_eq!(extraction.structured.len(), 2);
        assert_eq!(extraction.into_records().len(), 5);
    }

    #[test]
    fn test_prepare_creates_working_directory() {
        let pipeline = pipeline(MockStorage::new());

        pipeline.prepare().unwrap();
        pipeline.prepare().unwrap();

        assert!(pipeline.storage().has_dir("tempDataSet"));
    }

    #[test]
    fn test_transform_and_load() {
        let storage = MockStorage::new();
        storage.insert("inputDataSet/players.csv", PLAYERS_CSV);
        storage.insert("inputDataSet/players.json", PLAYERS_JSON);
        let pipeline = pipeline(storage);

        let records = pipeline.extract().unwrap().into_records();
        let result = pipeline.transform(records).unwrap();
        let path = pipeline.load(&result).unwrap();

        assert_eq!(result.players.len(), 3);
        assert_eq!(result.dropped_missing, 1);
        assert_eq!(result.dropped_out_of_range, 1);
        assert_eq!(result.players[2].player_type, PlayerType::Batsman);

        let written = pipeline.storage().get_text(&path).unwrap();
        assert_eq!(
            written,
            "eventType;playerName;age;runs;wickets;playerType\n\
             ODI;Player A;25;600;55;All-Rounder\n\
             Test;Player B;40;450;10;Bowler\n\
             ODI;Player D;30;700;12;Batsman\n"
        );
    }

    #[test]
    fn test_validate_and_report() {
        let storage = MockStorage::new();
        storage.insert("inputDataSet/players.csv", PLAYERS_CSV);
        storage.insert("inputDataSet/players.json", PLAYERS_JSON);
        storage.insert(
            "outputDataSet/odi.csv",
            "eventType;playerName;age;runs;wickets;playerType\n\
             ODI;Player A;25;600;55;All-Rounder\n\
             ODI;Player D;30;700;12;All-Rounder\n",
        );
        let pipeline = pipeline(storage);

        let records = pipeline.extract().unwrap().into_records();
        let result = pipeline.transform(records).unwrap();
        let report = pipeline.validate(&result).unwrap();
        let path = pipeline.report(&report).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].result, Verdict::Pass);
        assert_eq!(report.rows[1].result, Verdict::Fail);

        assert_eq!(path, "test_result.csv");
        let written = pipeline.storage().get_text("test_result.csv").unwrap();
        assert!(written.starts_with("eventType;playerName;age;runs;wickets;playerType;Result\n"));
        assert!(written.contains("ODI;Player D;30;700;12;Batsman;FAIL"));
    }
}
