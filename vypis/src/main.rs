use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vypislib::{config::Settings, convert};

#[derive(Parser, Debug)]
#[command(name = "vypis", version, about = "Нормализация банковских выписок")]
struct Cli {
    /// Путь к файлу настроек
    #[arg(long = "config", default_value = "vypis.toml")]
    config: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = match Settings::load(&cli.config) {
        Ok(settings) => settings,
        Err(error) => {
            error!(%error, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match convert::run(&settings) {
        Ok(summary) => {
            for skip in &summary.skipped {
                warn!(path = %skip.path.display(), reason = %skip.reason, "skipped");
            }
            for issue in &summary.errors {
                warn!(file = %issue.unit.display(), error = %issue.error, "failed");
            }
            info!(
                files = summary.files_processed,
                records = summary.records_written,
                failed = summary.errors.len(),
                "finished"
            );
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                error!("no file converted successfully");
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            error!(%error, "run aborted");
            ExitCode::FAILURE
        }
    }
}
