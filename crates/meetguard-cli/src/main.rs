//! meetguard CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use chrono::Local;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

use meetguard_cli::check::{CheckRequest, run_check};
use meetguard_cli::cli::Cli;
use meetguard_cli::config::AppConfig;
use meetguard_cli::error::CliResult;
use meetguard_core::init_tracing;
use meetguard_notify::{Notifier, SmtpMailer};
use meetguard_providers::google::GoogleProvider;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let today = Local::now().date_naive();
    let window = match cli.window(today, &Local) {
        Ok(window) => window,
        Err(e) => Cli::command()
            .error(clap::error::ErrorKind::ArgumentConflict, e)
            .exit(),
    };

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = match AppConfig::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let log_config = match config.log_config(&AppConfig::exe_dir()) {
        Ok(log_config) => log_config.with_stderr(cli.debug),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };
    let _guard = match init_tracing(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = CheckRequest {
        calendar_id: cli.calendar_id,
        window,
        max_results: cli.max_results.get(),
        recipient: cli.mail_recipient,
        company_domain: config.company_domain.clone(),
        company_label: config.company_label().to_string(),
        today,
    };

    match run(&config, &config_path, &request).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(config: &AppConfig, config_path: &Path, request: &CheckRequest) -> CliResult<()> {
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    // Mail settings are checked before the browser may open for consent.
    let mailer = SmtpMailer::new(&config.smtp_settings()?)?;
    let notifier = Notifier::new(mailer, config.sender())?;

    let provider = GoogleProvider::connect(&config.google_config(config_dir)).await?;

    let outcome = run_check(&provider, &notifier, request).await?;
    info!("check of {} finished: {:?}", request.calendar_id, outcome);
    Ok(())
}
