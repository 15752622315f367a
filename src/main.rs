use anyhow::{Context, Result};
use cfmeta::cli::{parse_args, Cli};
use cfmeta::commands::run_extract;
use cfmeta::config::{load_config, load_config_from_path, CfMetaConfig};
use std::process::ExitCode;

/// Exit code for failures that prevent extraction altogether
const FATAL_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let cli = parse_args();
    init_logging(&cli);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    let config = resolve_config(&cli)?;
    let settings = cli.into_settings(&config);
    log::debug!(
        "Extracting {} into {}",
        settings.input.display(),
        settings.output.display()
    );

    let status = run_extract(&settings, std::io::stdout())
        .with_context(|| format!("Failed to process {}", settings.input.display()))?;
    Ok(status.exit_code())
}

fn resolve_config(cli: &Cli) -> Result<CfMetaConfig> {
    match &cli.config {
        Some(path) => Ok(load_config_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_config(cwd))
        }
    }
}
