use anyhow::Context;
use clap::Parser;
use employee_export::core::ConfigProvider;
use employee_export::utils::{logger, validation::Validate};
use employee_export::{CliConfig, EmployeePipeline, EtlEngine, EtlError, HttpFetcher, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting employee-export");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let monitor_enabled = cli.monitor;
    let exit_code = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match TomlConfig::from_file(&path) {
                Ok(config) => {
                    let config = config.with_output_dir(cli.output_dir_override.clone());
                    let monitor = monitor_enabled || config.monitoring_enabled();
                    run(config, monitor).await?
                }
                Err(e) => {
                    report(&e);
                    e.severity().exit_code()
                }
            }
        }
        None => run(cli, monitor_enabled).await?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

/// Validates `config`, runs one export and returns the process exit code.
async fn run<C>(config: C, monitor_enabled: bool) -> anyhow::Result<i32>
where
    C: ConfigProvider + Validate,
{
    if let Err(e) = config.validate() {
        report(&e);
        return Ok(e.severity().exit_code());
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let fetcher = HttpFetcher::new(config.api_endpoint(), config.timeout_seconds())
        .context("failed to build HTTP client")?;
    let pipeline = EmployeePipeline::new(fetcher, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Export completed successfully!");
            println!("✅ Export completed successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(0)
        }
        Err(e) => {
            report(&e);
            Ok(e.severity().exit_code())
        }
    }
}

fn report(e: &EtlError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}
