use camino::Utf8PathBuf;

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Play tic-tac-toe against a computer that never loses")]
pub struct CliOptions {
    #[argh(option, description = "the path to the config")]
    pub config: Option<Utf8PathBuf>,

    #[argh(
        option,
        description = "the log file filter, overriding the config (e.g. \"debug\")"
    )]
    pub log_level: Option<String>,
}
