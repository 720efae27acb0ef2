use anyhow::Context;
use cobot_cell::{validate, CobotConfig};
use std::process::ExitCode;
use tracing::{error, info};

const USAGE: &str = "Usage: cobot-cell <config.yaml|config.json> [--explain]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cobot_cell=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config_path = None;
    let mut explain = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--explain" => explain = true,
            _ if config_path.is_none() => config_path = Some(arg),
            _ => {
                error!("{}", USAGE);
                return ExitCode::from(2);
            }
        }
    }

    let Some(config_path) = config_path else {
        error!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(&config_path, explain) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Validate one file; `Ok(true)` when the configuration is valid
fn run(config_path: &str, explain: bool) -> anyhow::Result<bool> {
    info!("cobot-cell v{} validating {}", cobot_cell::VERSION, config_path);

    let config = CobotConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path))?;
    let result = validate(&config);

    if result.is_valid() {
        info!("Configuration is valid");
        return Ok(true);
    }

    info!("Configuration has {} errors", result.errors.len());
    if explain {
        for err in result.errors.errors() {
            let current = config
                .value_at(&err.path)?
                .map(|value| value.to_string())
                .unwrap_or_else(|| "<missing>".to_string());
            println!("{}: {} [{}] current value: {}", err.path, err.label, err.kind, current);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&result.errors)?);
    }

    Ok(false)
}
