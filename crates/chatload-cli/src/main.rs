mod cli;
mod run;

use std::process::ExitCode;

use chatload_common::ChatloadError;
use chatload_config::{toml_loader, validation, ChatloadConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, Overrides};

const DEFAULT_LOG_DIRECTIVE: &str = "chatload=info";

/// Load environment variables from `./.env` (KEY=VALUE lines).
///
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(format!("chatload={level}"))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File, then environment, then CLI flags.
fn resolve_config(args: &Args, overrides: &Overrides) -> Result<ChatloadConfig, ChatloadError> {
    let mut config = chatload_config::load_config(args.config.as_deref())?;
    overrides.apply(&mut config);
    Ok(config)
}

async fn dispatch(args: Args) -> Result<(), ChatloadError> {
    match &args.command {
        Command::Run(overrides) => {
            let config = chatload_config::finalize(resolve_config(&args, overrides)?)?;
            let summary = run::execute(config).await?;
            println!("{}", summary.to_text());
        }
        Command::ShowConfig(overrides) => {
            let config = resolve_config(&args, overrides)?;
            validation::validate(&config)?;
            println!("{}", chatload_config::config_to_json(&config));
        }
        Command::InitConfig { path } => {
            let path = match path {
                Some(path) => path.clone(),
                None => toml_loader::default_config_path()?,
            };
            toml_loader::create_default_config(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Before the runtime starts any threads.
    load_dotenv();

    let args = cli::parse();
    init_tracing(args.log_level.as_deref());

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(dispatch(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
