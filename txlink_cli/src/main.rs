//! txlink CLI entry point.

mod cli;
mod error_fmt;
mod fly;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Commands, DEFAULT_CONFIG_PATH, FILE_GUARD, JSON_MODE};
use crate::fly::FlyOverrides;

fn main() -> ExitCode {
    // A second install only happens under test harnesses; ignore it.
    let _ = color_eyre::install();

    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => return fail(&e),
    };

    if let Err(e) = init_tracing(cli.json, &cli.log_level, &cfg.logging) {
        return fail(&e);
    }

    let outcome = match cli.cmd {
        Commands::Fly {
            host,
            port,
            poll_interval_s,
            zero_thresh,
            max_wait_s,
            sim,
        } => fly::run_fly(
            &cfg,
            FlyOverrides {
                host,
                port,
                poll_interval_s,
                zero_thresh,
                max_wait_s,
                sim,
            },
        ),
        Commands::Monitor { samples, sim } => fly::run_monitor(&cfg, samples, sim),
        Commands::SelfCheck { sim } => fly::run_self_check(&cfg, sim),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(err: &eyre::Report) -> ExitCode {
    if JSON_MODE.get().copied().unwrap_or(false) {
        eprintln!("{}", error_fmt::format_error_json(err));
    } else {
        eprintln!("{}", error_fmt::humanize(err));
    }
    ExitCode::from(error_fmt::exit_code_for_error(err))
}

/// Load and validate the config file. A missing file at the default
/// path falls back to built-in defaults; an explicitly named file must
/// exist.
fn load_config(cli: &Cli) -> eyre::Result<txlink_config::Config> {
    if cli.config.exists() {
        let cfg = txlink_config::load_path(&cli.config)?;
        cfg.validate()?;
        Ok(cfg)
    } else if cli.config == std::path::Path::new(DEFAULT_CONFIG_PATH) {
        Ok(txlink_config::Config::default())
    } else {
        Err(eyre::eyre!("config file {:?} not found", cli.config))
    }
}

fn init_tracing(
    json: bool,
    cli_level: &str,
    logging: &txlink_config::Logging,
) -> eyre::Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, fmt};

    // Precedence: RUST_LOG env, then an explicit --log-level, then the
    // config file's logging.level.
    let level = if cli_level != "info" {
        cli_level
    } else {
        logging.level.as_deref().unwrap_or("info")
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let file_writer = match &logging.file {
        Some(file) => {
            let path = std::path::Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file must name a file"))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(non_blocking)
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match (json, file_writer) {
        (true, Some(writer)) => registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_ansi(false).with_writer(writer))
            .init(),
        (true, None) => registry.with(fmt::layer().json()).init(),
        (false, Some(writer)) => registry
            .with(fmt::layer().with_target(false))
            .with(fmt::layer().json().with_ansi(false).with_writer(writer))
            .init(),
        (false, None) => registry.with(fmt::layer().with_target(false)).init(),
    }
    Ok(())
}
