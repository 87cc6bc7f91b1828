use clap::Parser;
use numerology_engine::config::toml_config::{AppConfig, ExportConfig};
use numerology_engine::domain::ports::{ConfigProvider, Storage};
use numerology_engine::utils::error::ErrorSeverity;
use numerology_engine::utils::{logger, validation, validation::Validate};
use numerology_engine::{ExportEngine, LocalStorage, RosterPipeline};

#[derive(Parser)]
#[command(name = "roster-export")]
#[command(about = "Export root, destiny and Lo Shu grid columns for a roster CSV")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "numerology.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from config
    #[arg(long)]
    output: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting roster export");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match AppConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let (Some(output), Some(export)) = (&args.output, config.export.as_mut()) {
        export.output_path = output.clone();
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    // 驗證配置
    let validated = config
        .validate()
        .and_then(|_| validation::required_section("export", &config.export).cloned());
    let export = match validated {
        Ok(export) => export,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&export, &args);

    let storage = LocalStorage::new(".".to_string());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&storage, &export).await;
        return Ok(());
    }

    let pipeline = RosterPipeline::new(storage, export);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Roster export completed successfully!");
            println!("✅ Roster export completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Roster export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(export: &ExportConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Export: {}", export.file_stem());
    println!("  Roster: {}", export.roster_path());
    println!("  Output: {}", export.output_path());
    println!("  Formats: {}", export.output_formats().join(", "));
    if let Some(archive) = export.compression_filename() {
        println!("  Compression: {} (ZIP)", archive);
    }
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

async fn perform_dry_run(storage: &LocalStorage, export: &ExportConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📄 Roster:");
    println!("  Path: {}", export.roster_path());
    if storage.exists(export.roster_path()).await {
        println!("  ✅ Roster file found");
    } else {
        println!("  ❌ Roster file not found");
    }

    println!();
    println!("💾 Output Files:");
    for format in export.output_formats() {
        println!("  {}/{}.{}", export.output_path(), export.file_stem(), format);
    }
    if let Some(archive) = export.compression_filename() {
        println!("  Bundled into {}/{}", export.output_path(), archive);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
