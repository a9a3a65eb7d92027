use anyhow::Context;
use clap::{Parser, Subcommand};
use geoid_convert::core::algorithm;
use geoid_convert::utils::{logger, validation::Validate};
use geoid_convert::{local_engine, CliConfig, RunReport};

#[derive(Parser)]
#[command(name = "geoid-convert")]
#[command(about = "Convert GNSS ellipsoidal heights to orthometric heights with gdalwarp")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one raster
    Run(CliConfig),
    /// Show the algorithm and its parameters
    Describe {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_json);

    match cli.command {
        Command::Describe { json } => describe(json),
        Command::Run(config) => run(config).await,
    }
}

fn describe(json: bool) -> anyhow::Result<()> {
    let algorithm = algorithm::descriptor();

    if json {
        let text = serde_json::to_string_pretty(&algorithm)
            .context("failed to serialize algorithm descriptor")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{} ({})", algorithm.display_name, algorithm.name);
    println!("  Group: {} [{}]", algorithm.group, algorithm.group_id);
    println!("  Command: {}", algorithm.command_name);
    println!("  Parameters:");
    for parameter in &algorithm.parameters {
        match parameter.file_filter {
            Some(filter) => println!(
                "    {:<16} {:?} - {} ({})",
                parameter.key, parameter.kind, parameter.description, filter
            ),
            None => println!(
                "    {:<16} {:?} - {}",
                parameter.key, parameter.kind, parameter.description
            ),
        }
    }
    Ok(())
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    tracing::info!("Starting geoid-convert");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let engine = local_engine(&config);

    match engine.run(&config.to_job()).await {
        Ok(report) => print_report(&report, config.json)?,
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

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

fn print_report(report: &RunReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("failed to serialize run report")?
        );
    } else if report.executed {
        println!("✅ Conversion completed successfully!");
        println!("📁 Output saved to: {}", report.output);
    } else {
        println!("{} {}", report.program, report.command_line);
    }
    Ok(())
}
