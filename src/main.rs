use clap::Parser;
use player_etl::utils::error::ErrorSeverity;
use player_etl::utils::{logger, validation::Validate};
use player_etl::{CliConfig, EtlEngine, LocalStorage, PlayerPipeline};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting player-etl");
    tracing::debug!("CLI arguments: {:?}", cli);

    // 合併並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let monitor_enabled = config.monitor;
    let pipeline = PlayerPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ ETL process completed successfully!");
            if let Ok(summary) = serde_json::to_string(&report) {
                tracing::debug!("Run report: {}", summary);
            }
            println!("✅ ETL process completed successfully!");
            println!("📁 Processed data: {} ({} records)", report.processed_path, report.processed);
            println!(
                "🧾 Validation result: {} ({} PASS, {} FAIL)",
                report.result_path, report.passed, report.failed
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
