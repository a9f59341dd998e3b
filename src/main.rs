mod app_search;
mod cli;
mod config;
mod database;
mod error;
mod patch;
mod reg_locator;

use directories::ProjectDirs;
use log::error;

use crate::cli::Cli;
use crate::config::Config;

fn main() {
    let config = ProjectDirs::from("", "", "msi64")
        .map(|project_dirs| Config::load_config(&project_dirs))
        .unwrap_or_else(Config::defaults);
    config::CONFIG.set(config).ok();

    // The handle must stay alive for the duration of the run
    let _logger = init_logging();

    if let Err(err) = Cli::handle_command_line() {
        error!("{:?}", err);
        println!("{}", err);
        std::process::exit(err.exit_code());
    }
}

/// Starts flexi_logger with the configured level. Logging is best effort:
/// a failure here is reported but never stops the patch.
fn init_logging() -> Option<flexi_logger::LoggerHandle> {
    let level = config::CONFIG
        .get()
        .map(|config| config.logging.msi64.as_str())
        .unwrap_or("info");
    let spec = format!("msi64={}", level);

    match flexi_logger::Logger::try_with_env_or_str(&spec) {
        Ok(logger) => match logger.start() {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Failed to start logger: {}", e);
                None
            }
        },
        Err(e) => {
            eprintln!("Invalid log specification '{}': {}", spec, e);
            None
        }
    }
}
