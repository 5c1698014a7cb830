use anyhow::Context;
use clap::Parser;
use ship_counter::app::render;
use ship_counter::core::pipeline::{
    BUNDLE_FILE, CITY_COUNTS_FILE, CLEANED_DATASET_FILE, STATE_COUNTS_FILE, SUMMARY_FILE,
};
use ship_counter::core::{ConfigProvider, Pipeline};
use ship_counter::utils::error::ErrorSeverity;
use ship_counter::utils::{logger, validation::Validate};
use ship_counter::{LocalStorage, ReportEngine, ReportPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Ship state & city report driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the number of rows shown in the top-N charts
    #[arg(long)]
    top_n: Option<usize>,

    /// Emit JSON logs instead of compact text
    #[arg(long)]
    json_logs: bool,

    /// Dry run - parse the input and show what would be produced without writing exports
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    let verbose = args.verbose
        || config
            .monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .is_some_and(|level| level.eq_ignore_ascii_case("debug"));

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(top_n) = args.top_n {
        config.view.top_n = Some(top_n);
        tracing::info!("🔧 top_n overridden to: {}", top_n);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let top_n = config.top_n();
    let pipeline = ReportPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No exports will be written");
        perform_dry_run(&pipeline).await?;
        return Ok(());
    }

    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            println!("{}", render::render_report(&outcome.result, top_n));
            println!("📁 Exports saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Top N: {}", config.top_n());
    println!("  Cleaned dataset: {}", config.include_cleaned_dataset());
    println!("  Bundle: {}", config.bundle_outputs());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(pipeline: &ReportPipeline<LocalStorage, TomlConfig>) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");

    // 只做解析，不寫入任何檔案
    let table = pipeline
        .extract()
        .await
        .with_context(|| format!("could not read '{}'", pipeline.config().input_path()))?;

    println!("  Columns: {}", table.headers().len());
    println!("  State column: {}", table.state_column());
    println!("  City column: {}", table.city_column());
    println!("  Rows: {}", render::format_count(table.len()));

    println!();
    println!("💾 Would write to {}:", pipeline.config().output_path());
    if pipeline.config().bundle_outputs() {
        println!("  {}", BUNDLE_FILE);
    } else {
        println!("  {}, {}, {}", STATE_COUNTS_FILE, CITY_COUNTS_FILE, SUMMARY_FILE);
        if pipeline.config().include_cleaned_dataset() {
            println!("  {}", CLEANED_DATASET_FILE);
        }
    }

    println!();
    println!("✅ Dry run analysis complete.");
    Ok(())
}
