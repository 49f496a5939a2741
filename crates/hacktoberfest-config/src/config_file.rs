use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Raw contents of the config file that was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub content: String,
}

/// Load config file content from the explicit path, or from the home directory
///
/// Searches for the config in:
/// 1. `explicit` if given (the home directory is not consulted then)
/// 2. `~/.hacktoberfest-cli.toml`
///
/// A missing file is not an error and yields `None`. Failing to resolve the
/// home directory is.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => crate::paths::home_config_path()?,
    };

    read_if_present(&path)
}

pub(crate) fn read_if_present(path: &Path) -> Result<Option<ConfigFile>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Ok(Some(ConfigFile {
                path: path.to_path_buf(),
                content,
            }))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config file at {}", path.display());
            Ok(None)
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
        }
    }
}
