// common/src/config.rs
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use config::{Config as ConfigFile, File, Environment};

/// Central configuration for the gateway
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Address the gateway binds to
    pub gateway_addr: String,
    /// Backend RPC host, read once at startup and injected into the
    /// backend client; never re-read after that
    pub backend_host: String,

    // Static file serving configuration
    pub static_files: StaticFilesConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    pub path: String,
    pub index: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_addr: "127.0.0.1:8081".to_string(),
            backend_host: "127.0.0.1:8080".to_string(),

            static_files: StaticFilesConfig {
                path: "./static".to_string(),
                index: "index.html".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        // Get the run mode, defaulting to "development"
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Locate the config directory
        let config_dir = env::var("CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Check if we're in the project root or a subcrate
                let mut path = PathBuf::from("./config");
                if !path.exists() {
                    path = PathBuf::from("../config");
                }
                path
            });

        tracing::info!("Loading configuration from {}", config_dir.display());
        tracing::info!("Using run mode: {}", run_mode);

        // Build configuration
        let config = ConfigFile::builder()
            // Start with defaults
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add environment specific config
            .add_source(File::from(config_dir.join(format!("{}.toml", run_mode))).required(false))
            // Add a local config file for local overrides
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables with prefix "APP"
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Build and deserialize
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load from environment variables directly (backward compatibility)
    pub fn from_env() -> Self {
        // Try to load from file first
        match Self::load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from files and environment");
                config
            },
            Err(e) => {
                tracing::warn!("Failed to load configuration from files: {}", e);
                tracing::info!("Falling back to environment variables only");

                // Fall back to the old method
                let gateway_addr = env::var("GATEWAY_ADDR")
                    .unwrap_or_else(|_| "127.0.0.1:8081".to_string());

                let backend_host = env::var("BACKEND_RPC_HOST")
                    .unwrap_or_else(|_| "127.0.0.1:8080".to_string());

                // Static file serving configuration
                let static_files_path = env::var("STATIC_FILES_PATH")
                    .unwrap_or_else(|_| "./static".to_string());

                let static_files_index = env::var("STATIC_FILES_INDEX")
                    .unwrap_or_else(|_| "index.html".to_string());

                Self {
                    gateway_addr,
                    backend_host,
                    static_files: StaticFilesConfig {
                        path: static_files_path,
                        index: static_files_index,
                    },
                }
            }
        }
    }
}
