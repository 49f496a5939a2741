//! Configuration and file management for hacktoberfest-cli
//!
//! This crate provides:
//! - File path utilities for the config file and the cached token
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig) with environment overrides

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, LoadedConfig, ENV_PREFIX};
pub use config_file::{load_config_file, ConfigFile};
pub use paths::{config_dir, home_config_path, home_dir, token_path, APP_NAME};
