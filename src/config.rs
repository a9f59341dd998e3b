use std::fs;

use directories::ProjectDirs;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoggingConfig {
    pub msi64: String,
}

impl LoggingConfig {
    const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    const MSI64_LEVEL: &str = "info";

    fn default() -> Self {
        LoggingConfig {
            msi64: Self::MSI64_LEVEL.to_string(),
        }
    }

    fn ensure_valid(&mut self) {
        // Trim and lowercase the configured level, then confirm that it's a
        // valid log level. If not, inform the user and use the default
        let str_original = self.msi64.clone();
        self.msi64 = self.msi64.trim().to_ascii_lowercase();
        if !Self::LOG_LEVELS.contains(&self.msi64.as_str()) {
            eprintln!(
                "Config error: msi64 log level of '{}' is invalid - using default of '{}'",
                str_original,
                Self::MSI64_LEVEL
            );
            self.msi64 = Self::MSI64_LEVEL.to_owned();
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
}

impl Config {
    pub fn defaults() -> Self {
        Config {
            logging: LoggingConfig::default(),
        }
    }

    /// Loads the configuration from a TOML file located in the app's data
    /// directory. If the file is missing or fails to parse, defaults are
    /// used. Additionally, writes the default config to disk if no file
    /// exists.
    pub fn load_config(project_dirs: &ProjectDirs) -> Self {
        let config_path = project_dirs.data_local_dir().join("config.toml");

        let default_config = Config::defaults();

        // If the config file doesn't exist, write the default configuration to disk.
        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!(
                        "Failed to create configuration directory {}: {}",
                        parent.display(),
                        e
                    );
                }
            }
            if let Ok(toml_string) = toml::to_string_pretty(&default_config) {
                if let Err(e) = fs::write(&config_path, toml_string) {
                    eprintln!(
                        "Failed to write default config to {}: {}",
                        config_path.display(),
                        e
                    );
                }
            } else {
                eprintln!("Failed to serialize default config.");
            }
        }

        // Build a Figment instance that uses the defaults merged with the TOML file (if it exists)
        let figment = Figment::from(Serialized::defaults(default_config.clone()))
            .merge(Toml::file(&config_path));

        // Attempt to extract the configuration; on error, log a message and fall back to defaults.
        let mut config: Config = figment.extract().unwrap_or_else(|err| {
            eprintln!(
                "Could not load config file {}: {}. Using default configuration.",
                config_path.display(),
                err
            );
            default_config
        });

        config.ensure_valid();

        config
    }

    fn ensure_valid(&mut self) {
        self.logging.ensure_valid();
    }
}
