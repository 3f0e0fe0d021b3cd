use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use tracing::{info, warn};

/// File name of the SQLite database when no URL is configured
pub const DEFAULT_DATABASE_FILE: &str = "polls.db";

/// Configuration for the polls server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the bind address
    #[serde(default)]
    pub host: Option<String>,
    /// Optional update for the port
    #[serde(default)]
    pub port: Option<u16>,
    /// Server URL used by the CLI client (ignored by the server)
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug)]
#[clap(name = "polls", about = "A small polls server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind to
    #[clap(long, env = "POLLS_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[clap(long, env = "POLLS_PORT")]
    pub port: Option<u16>,

    /// Debug mode
    #[clap(long, env = "POLLS_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
        }
    }

    /// Returns the `host:port` string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default port: 3001 in debug builds, 3000 in release
pub fn default_port() -> u16 {
    if cfg!(debug_assertions) { 3001 } else { 3000 }
}

/// Returns the base (default) configuration
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.map_or(DEFAULT_DATABASE_FILE.to_string(), |path| {
        path.join(DEFAULT_DATABASE_FILE).to_string_lossy().to_string()
    });

    Config {
        database_url,
        host: "127.0.0.1".to_string(),
        port: default_port(),
    }
}

/// Returns the XDG config directory for polls, if it can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "polls", "polls") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Returns the XDG data directory for polls (used for log files)
pub fn get_data_dir_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "polls", "polls").map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            },
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        host: args.host.clone(),
        port: args.port,
        server_url: None,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let config_dir = get_config_dir_path().and_then(|path| {
        if !path.exists() {
            info!("Config path not found at {:?}, using defaults", path);
            None
        } else {
            Some(path)
        }
    });

    let base = base_config(config_dir.clone());
    let file_update = config_from_file(config_dir.map(|dir| dir.join("config.toml")))
        .unwrap_or_default();

    // Apply updates in order of increasing precedence
    let config = base
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    info!("Final configuration: database_url={}, bind={}",
          config.database_url, config.bind_address());

    config
}
