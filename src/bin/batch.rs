use clap::Parser;
use geoid_convert::core::ToolConfig;
use geoid_convert::utils::{logger, validation::Validate};
use geoid_convert::{local_engine, TomlConfig};

#[derive(Parser)]
#[command(name = "geoid-batch")]
#[command(about = "Run geoid height conversions listed in a TOML job file")]
struct Args {
    /// Path to TOML job file
    #[arg(short, long, default_value = "geoid-jobs.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Show the gdalwarp commands without executing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting geoid batch conversion");
    tracing::info!("📁 Loading jobs from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 命令列覆蓋設定
    if args.dry_run {
        config.set_dry_run(true);
        tracing::info!("🔧 Dry run enabled from command line");
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let jobs = config.jobs()?;
    display_config_summary(&config, jobs.len());

    let engine = local_engine(&config);

    match engine.run_batch(&jobs).await {
        Ok(reports) => {
            for report in &reports {
                if report.executed {
                    println!("✅ {} -> {}", report.input.source, report.output);
                } else {
                    println!("{} {}", report.program, report.command_line);
                }
            }
            tracing::info!("✅ {} job(s) finished", reports.len());
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, job_count: usize) {
    println!("📋 Configuration Summary:");
    println!("  gdalwarp: {}", config.gdalwarp());
    println!("  gdalinfo: {}", config.gdalinfo());
    println!("  Jobs: {}", job_count);
    if config.dry_run() {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}
