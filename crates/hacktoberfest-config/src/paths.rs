//! Configuration and token file paths
//!
//! Everything lives under the user's home directory, independent of platform:
//! - `~/.hacktoberfest-cli.toml` for the optional config file
//! - `~/.config/hacktoberfest-cli/.token.json` for the cached credential

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "hacktoberfest-cli";
const TOKEN_FILE: &str = ".token.json";
const HOME_CONFIG_FILE: &str = ".hacktoberfest-cli.toml";

/// Resolve the current user's home directory
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine home directory")
}

/// Get the application config directory (`~/.config/hacktoberfest-cli`)
///
/// The directory is not created here; the token cache creates it on first write.
pub fn config_dir() -> Result<PathBuf> {
    Ok(config_dir_in(&home_dir()?))
}

/// Get path to the cached OAuth credential
pub fn token_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(TOKEN_FILE))
}

/// Get path to the conventional config file in the home directory
pub fn home_config_path() -> Result<PathBuf> {
    Ok(home_config_path_in(&home_dir()?))
}

fn config_dir_in(home: &Path) -> PathBuf {
    home.join(".config").join(APP_NAME)
}

pub(crate) fn home_config_path_in(home: &Path) -> PathBuf {
    home.join(HOME_CONFIG_FILE)
}
