use std::process;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use dockdeck::app;
use dockdeck::config::Config;

fn init_logging(config: &Config) -> WorkerGuard {
    let dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = config.log_file.file_name().unwrap_or_else(|| std::ffi::OsStr::new("dockdeck.log"));
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn main() {
    let config = Config::parse();
    let _guard = init_logging(&config);

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&should_quit)) {
            error!(signal, error = %e, "failed to register signal handler");
        }
    }

    info!("dockdeck starting");
    if let Err(e) = app::run(&config, should_quit) {
        app::restore_terminal();
        error!(error = %e, "dockdeck failed");
        eprintln!("dockdeck: {}", e);
        process::exit(1);
    }
    info!("dockdeck stopped");
}
