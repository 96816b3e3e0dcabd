use crate::config::{
    Config,
    Severity,
};
use anyhow::{
    ensure,
    Context,
};
use camino::Utf8Path;

/// Load a config, or use the default one if there is no path.
///
/// The log level override is applied before validation.
/// Validation messages go straight to the stderr,
/// since this runs before the logger exists.
pub(crate) fn load_config(
    path: Option<&Utf8Path>,
    log_level: Option<String>,
) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            eprintln!("loading `{path}`...");
            Config::load_from_path(path).with_context(|| format!("failed to load `{path}`"))?
        }
        None => Config::default(),
    };
    if let Some(log_level) = log_level {
        config.log_level = log_level;
    }

    let mut num_errors = 0;
    for message in config.validate() {
        let label = match message.severity() {
            Severity::Warn => "warning",
            Severity::Error => {
                num_errors += 1;
                "error"
            }
        };
        eprintln!("config {label}: {}", message.error());
    }
    ensure!(num_errors == 0, "config has {num_errors} error(s)");

    Ok(config)
}
