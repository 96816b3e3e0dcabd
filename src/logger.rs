use crate::config::Config;
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{
        EnvFilter,
        LevelFilter,
    },
    layer::SubscriberExt,
    Layer,
};

/// The name of the log file, inside the log dir.
const LOG_FILE_NAME: &str = "tic-tac-toe.log";

/// Try to setup a logger.
///
/// The stderr shares the terminal with the game, so it only gets warnings and errors.
/// Everything allowed by the config's log level goes to the log file, if there is a log dir.
///
/// # Returns
/// Returns a guard that flushes the log file when dropped.
pub fn setup(config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::WARN);

    let (file_formatting_layer, worker_guard) = match config.log_dir.as_deref() {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("failed to create log dir `{log_dir}`"))?;

            let env_filter = EnvFilter::try_new(&config.log_level)
                .with_context(|| format!("invalid log level \"{}\"", config.log_level))?;
            let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
            let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(env_filter);

            (Some(layer), Some(worker_guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::Registry::default()
        .with(file_formatting_layer)
        .with(stderr_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(worker_guard)
}
