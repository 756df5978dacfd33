mod app;
mod config;
mod error;
mod paths;

use std::fs::File;

use shadowdom::Terminal;
use simplelog::{Config, WriteLogger};

use crate::app::App;
use crate::config::HostConfig;
use crate::error::HostError;

fn main() {
    paths::rotate_logs();

    let config = match paths::config_file() {
        Some(path) => HostConfig::load(&path),
        None => Ok(HostConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&config) {
        log::error!("search-host exited: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(config: &HostConfig) {
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Err(e) = paths::ensure_parent_dir(&path) {
        eprintln!("Failed to create log directory for {}: {e}", path.display());
    }
    let level = config.log_level().unwrap_or(simplelog::LevelFilter::Debug);
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {e}", path.display()),
    }
}

fn run(config: &HostConfig) -> Result<(), HostError> {
    let mut app = App::new(config)?;
    log::info!("search-host started");

    let mut term = Terminal::new()?;
    while !app.should_quit() {
        term.render(app.document())?;
        for event in term.poll(None)? {
            app.handle_event(&event, term.layout())?;
        }
    }

    log::info!("search-host exiting");
    Ok(())
}
