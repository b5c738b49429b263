//! Filesystem locations

use std::path::PathBuf;

use crate::constants::paths::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOGS_DIR_NAME};

/// Root configuration directory (`~/.cardfeed`)
///
/// Falls back to the current directory when no home directory is known.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Default configuration file
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Log output directory
pub fn logs_dir() -> PathBuf {
    config_dir().join(LOGS_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        assert!(config_file().starts_with(config_dir()));
        assert!(logs_dir().starts_with(config_dir()));
        assert!(config_file().ends_with("config.toml"));
    }
}
