use anyhow::Context;
use clap::Parser;
use merge_pdf::core::ConfigProvider;
use merge_pdf::utils::error::ErrorSeverity;
use merge_pdf::utils::{logger, validation::Validate};
use merge_pdf::{
    CliConfig, LocalStorage, MergeEngine, MergeError, MergePipeline, MergeReport, TomlConfig,
};

async fn run<C: ConfigProvider + Validate>(config: C, monitor: bool) -> merge_pdf::Result<MergeReport> {
    // 驗證配置
    config.validate()?;

    let storage = LocalStorage::new(config.base_dir());
    let pipeline = MergePipeline::new(storage, config);
    MergeEngine::new_with_monitoring(pipeline, monitor).run().await
}

async fn execute(cli: &CliConfig) -> merge_pdf::Result<MergeReport> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading merge job from: {}", path.display());
            let mut job = TomlConfig::from_file(path)?;
            job.apply_overrides(cli);
            run(job, cli.monitor).await
        }
        None => run(cli.clone(), cli.monitor).await,
    }
}

fn exit_code(e: &MergeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);
    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match execute(&cli).await {
        Ok(report) => {
            if cli.json {
                let json = serde_json::to_string_pretty(&report)
                    .context("failed to serialize merge report")?;
                println!("{}", json);
            } else if report.dry_run {
                println!(
                    "✅ Dry run: {} page(s) from {} file(s), nothing written",
                    report.page_count,
                    report.sources.len()
                );
            } else {
                println!(
                    "✅ Merged {} page(s) from {} file(s)",
                    report.page_count,
                    report.sources.len()
                );
                println!("📁 Output saved to: {}", report.output.display());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Merge failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(exit_code(&e));
        }
    }
}
