use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::{ResultExporter, ReviewAnalysisUseCase};
use crate::application::use_cases::result_export::{to_json, to_plain_text_all};
use crate::domain::error::{AppError, Result};
use crate::domain::review::Notification;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::interfaces::cli::{Cli, Command};
use crate::interfaces::http::{start_server, HttpState};

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let config_service = cli
        .config
        .as_ref()
        .map(ConfigService::with_path)
        .unwrap_or_default();
    let config = match config_service.load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);

    let result = actix_web::rt::System::new().block_on(async move {
        match cli.command {
            Command::Analyze {
                file,
                export,
                text,
                seed,
                no_delay,
            } => analyze(config, file, export, text, seed, no_delay).await,
            Command::Serve { host, port } => serve(config, host, port).await,
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let notification = Notification::from_error(&err);
            eprintln!("{}: {}", notification.title, notification.message);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn analyze(
    mut config: AppConfig,
    file: PathBuf,
    export: Option<PathBuf>,
    text: bool,
    seed: Option<u64>,
    no_delay: bool,
) -> Result<()> {
    if no_delay {
        config.analysis.simulated_delay_ms = 0;
    }

    let random: Arc<dyn RandomSource> = match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };
    let use_case = ReviewAnalysisUseCase::new(config.analysis, random);
    let outcome = use_case.analyze_file(&file).await?;
    eprintln!("{}: {}", outcome.notification.title, outcome.notification.message);

    if text {
        print!("{}", to_plain_text_all(&outcome.products));
    } else {
        println!("{}", to_json(&outcome.products)?);
    }

    if let Some(target) = export {
        let path = ResultExporter::new(config.export).write_export(&outcome.products, &target)?;
        let notification = Notification::exported(&path.display().to_string());
        eprintln!("{}: {}", notification.title, notification.message);
    }

    Ok(())
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let state = HttpState {
        analysis: Arc::new(ReviewAnalysisUseCase::with_config(config.analysis.clone())),
        exporter: ResultExporter::new(config.export.clone()),
        logs: Arc::new(Mutex::new(Vec::new())),
    };

    start_server(state, &config.server)?
        .await
        .map_err(|e| AppError::Internal(format!("HTTP server stopped: {}", e)))
}
