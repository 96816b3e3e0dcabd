#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # Tic Tac Toe

pub mod cli_options;
pub mod config;
pub mod console;
pub mod logger;
pub mod setup;

use crate::{
    cli_options::CliOptions,
    config::Config,
    console::{
        Console,
        Input,
    },
};
use anyhow::Context as _;
use tic_tac_toe::Simulation;
use tracing::{
    error,
    info,
    warn,
};
use tracing_appender::non_blocking::WorkerGuard;

/// Data from the setup function
struct SetupData {
    config: Config,
    worker_guard: Option<WorkerGuard>,
}

/// Pre-main setup
fn setup(cli_options: CliOptions) -> anyhow::Result<SetupData> {
    let config = setup::load_config(cli_options.config.as_deref(), cli_options.log_level)
        .context("failed to load config")?;

    let worker_guard = logger::setup(&config).context("failed to initialize logger")?;

    Ok(SetupData {
        config,
        worker_guard,
    })
}

/// The main entry.
///
/// Sets up the program and calls `real_main`.
/// This allows more things to drop correctly.
/// This also calls setup operations like loading config,
/// logging errors to the stderr instead of the loggers, which are not initialized yet.
fn main() -> anyhow::Result<()> {
    // This line MUST run first.
    // It is needed to exit early if the options are invalid,
    // and this will NOT run destructors if it does so.
    let cli_options = argh::from_env();
    let setup_data = setup(cli_options)?;
    real_main(setup_data)?;
    Ok(())
}

/// The actual entry point
fn real_main(setup_data: SetupData) -> anyhow::Result<()> {
    info!("starting tic-tac-toe");

    let (sender, receiver) = crossbeam::channel::unbounded();

    let interrupt_sender = sender.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        // The console is gone if this fails, so there is nobody to tell.
        interrupt_sender.send(Input::Interrupted).ok();
    })
    .context("failed to set ctrl-c handler")
    {
        // The default "kill everything" handler is still installed.
        warn!("{error}");
    }

    // This thread is left blocked on the stdin at exit.
    console::spawn_reader(std::io::BufReader::new(std::io::stdin()), sender);

    let stdout = std::io::stdout();
    let mut simulation = Simulation::new();
    let ret = Console::new(receiver, stdout.lock(), &setup_data.config)
        .run(&mut simulation)
        .context("game loop failed");

    match ret.as_ref() {
        Ok(()) => info!("successful shutdown"),
        Err(error) => error!("{error:?}"),
    }

    // Logging no longer reliable past this point
    drop(setup_data.worker_guard);

    ret
}
